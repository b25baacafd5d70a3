use serde::Serialize;
use thiserror::Error;

/// Terminal states of a session. Once one of these is recorded the
/// session never recovers; the caller has to authenticate again.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionError {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("access token refresh failed")]
    RefreshFailed,

    #[error("session lifetime exceeded")]
    SessionExpired,

    #[error("unknown session")]
    UnknownSession,
}
