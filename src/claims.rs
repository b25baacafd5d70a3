use std::fmt::{Display, Formatter};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use time::OffsetDateTime;
use crate::data::Role;

#[derive(Clone, Debug)]
pub struct AccessTokenClaims {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    pub expires_at: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct RawClaims {
    sub: Option<String>,
    user_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: Option<Role>,
    exp: Option<i64>,
}

impl AccessTokenClaims {
    /// Reads the payload segment of a compact JWT without checking its
    /// signature. The result carries display identity only; the token
    /// itself stays the sole trust-bearing artifact and is forwarded to
    /// the backend opaquely.
    pub fn parse(token: impl AsRef<str>) -> Result<Self, ClaimsError> {
        let payload = token.as_ref()
            .split('.')
            .nth(1)
            .ok_or(ClaimsError::TokenFormatError)?;
        let payload = Base64UrlUnpadded::decode_vec(payload)
            .map_err(|_| ClaimsError::TokenFormatError)?;
        let raw: RawClaims = serde_json::from_slice(&payload)?;
        let user_id = raw.user_id
            .or(raw.sub)
            .ok_or(ClaimsError::PayloadError)?;
        let expires_at = raw.exp
            .map(OffsetDateTime::from_unix_timestamp)
            .transpose()
            .map_err(|_| ClaimsError::PayloadError)?;
        Ok(
            AccessTokenClaims {
                user_id,
                email: raw.email,
                display_name: raw.name,
                role: raw.role.unwrap_or(Role::User),
                expires_at,
            }
        )
    }
}

#[derive(Debug)]
pub enum ClaimsError {
    TokenFormatError,
    PayloadError,
}

impl Display for ClaimsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimsError::TokenFormatError =>
                f.write_str("not a compact JWT"),
            ClaimsError::PayloadError =>
                f.write_str("error decoding token payload"),
        }
    }
}
impl std::error::Error for ClaimsError {}

impl From<serde_json::Error> for ClaimsError {
    fn from(_: serde_json::Error) -> ClaimsError {
        ClaimsError::PayloadError
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS512","typ":"JWT"}"#);
        let payload = Base64UrlUnpadded::encode_string(payload.as_bytes());
        format!("{header}.{payload}.unchecked")
    }

    #[test]
    fn parse_full_claims() {
        let claims = AccessTokenClaims::parse(token_with_payload(
            r#"{"sub":"u_17","email":"o@t.cm","name":"Orga Nizer","role":"organizer","exp":1767225600}"#,
        )).unwrap();
        assert_eq!(claims.user_id, "u_17");
        assert_eq!(claims.email.as_deref(), Some("o@t.cm"));
        assert_eq!(claims.display_name.as_deref(), Some("Orga Nizer"));
        assert_eq!(claims.role, Role::Organizer);
        assert_eq!(claims.expires_at, Some(datetime!(2026-01-01 0:00 UTC)));
    }

    #[test]
    fn parse_prefers_user_id_claim_over_sub() {
        let claims = AccessTokenClaims::parse(token_with_payload(
            r#"{"sub":"ignored","user_id":"u_2"}"#,
        )).unwrap();
        assert_eq!(claims.user_id, "u_2");
    }

    #[test]
    fn parse_defaults_missing_role_to_user() {
        let claims = AccessTokenClaims::parse(token_with_payload(r#"{"sub":"u_3"}"#)).unwrap();
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.expires_at, None);
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = AccessTokenClaims::parse(token_with_payload(
            r#"{"sub":"u_4","role":"superuser"}"#,
        )).unwrap_err();
        assert!(matches!(err, ClaimsError::PayloadError), "wrong error: {err:?}");
    }

    #[test]
    fn parse_rejects_missing_subject() {
        let err = AccessTokenClaims::parse(token_with_payload(r#"{"email":"a@b.cm"}"#))
            .unwrap_err();
        assert!(matches!(err, ClaimsError::PayloadError), "wrong error: {err:?}");
    }

    #[test]
    fn parse_rejects_opaque_token() {
        let err = AccessTokenClaims::parse("not-a-jwt").unwrap_err();
        assert!(matches!(err, ClaimsError::TokenFormatError), "wrong error: {err:?}");
    }

    #[test]
    fn parse_rejects_bad_base64() {
        let err = AccessTokenClaims::parse("aGVhZGVy.$$$.c2ln").unwrap_err();
        assert!(matches!(err, ClaimsError::TokenFormatError), "wrong error: {err:?}");
    }
}
