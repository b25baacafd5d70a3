mod errors;
mod internal;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;
use crate::data::{EmailAddress, Role};

pub use errors::SessionError;
pub use internal::{ProductionSessionManager, SessionManagerImpl};
pub use internal::io_trait::{ProductionSessionManagerIo, SessionManagerIo};

/// Client-safe projection of a session. The refresh credential is
/// structurally absent: nothing outside the manager ever sees it.
#[derive(Clone, Debug, Serialize)]
pub struct SessionView {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub access_token: String,
    pub error: Option<SessionError>,
}

#[async_trait]
pub trait SessionManager: Send + Sync + 'static {
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        remember_me: bool,
    ) -> Result<(Uuid, SessionView), SessionError>;

    async fn valid_token(
        &self,
        session_id: Uuid,
    ) -> Result<String, SessionError>;

    async fn hydrate(
        &self,
        session_id: Uuid,
    ) -> Option<SessionView>;

    async fn logout(
        &self,
        session_id: Uuid,
    ) -> Result<bool, SessionError>;
}
