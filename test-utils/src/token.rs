use base64ct::{Base64UrlUnpadded, Encoding};
use time::OffsetDateTime;

/// Builds a compact JWT whose signature is never checked by the
/// gateway; only the payload claims matter for tests.
pub fn make_access_token(
    user_id: &str,
    email: &str,
    display_name: &str,
    role: &str,
    expires_at: Option<OffsetDateTime>,
) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS512","typ":"JWT"}"#);
    let mut claims = serde_json::json!({
        "sub": user_id,
        "email": email,
        "name": display_name,
        "role": role,
    });
    if let Some(expires_at) = expires_at {
        claims["exp"] = expires_at.unix_timestamp().into();
    }
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.unchecked")
}
