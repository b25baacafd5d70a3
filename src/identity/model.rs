use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(super) struct TokenRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(super) struct TokenResponse {
    pub access: String,
    pub refresh: Option<String>,
}

#[derive(Serialize)]
pub(super) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Deserialize)]
pub(super) struct RefreshResponse {
    pub access: String,
}

/// Credentials minted by a successful exchange. The refresh half stays
/// server-side for the whole session lifetime.
#[derive(Clone, Debug)]
pub struct IssuedTokens {
    pub access: String,
    pub refresh: Option<String>,
}
