use serde::{Deserialize, Serialize};
use crate::session::SessionError;

#[derive(Debug, Deserialize)]
pub struct LoginRequestBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenBody {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenErrorBody {
    pub error: SessionError,
}
