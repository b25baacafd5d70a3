use base64ct::{Base64UrlUnpadded, Encoding};
use time::OffsetDateTime;

pub(super) const ORGANIZER_EMAIL: &str = "organizer@tiko.cm";

pub(super) fn make_access_token(
    user_id: &str,
    role: &str,
    expires_at: Option<OffsetDateTime>,
) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS512","typ":"JWT"}"#);
    let mut claims = serde_json::json!({
        "sub": user_id,
        "email": ORGANIZER_EMAIL,
        "name": "Orga Nizer",
        "role": role,
    });
    if let Some(expires_at) = expires_at {
        claims["exp"] = expires_at.unix_timestamp().into();
    }
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.unchecked")
}
