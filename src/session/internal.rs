use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, info, warn};
use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;
use crate::app_constants::{
    ACCESS_TOKEN_FALLBACK_VALIDITY_TIME,
    EXTENDED_SESSION_VALIDITY_TIME,
    SESSION_VALIDITY_TIME,
};
use crate::claims::AccessTokenClaims;
use crate::data::{EmailAddress, Role};
use crate::identity::IdentityClient;
use crate::session::{SessionError, SessionManager, SessionView};
use crate::session::internal::io_trait::{ProductionSessionManagerIo, SessionManagerIo};

pub mod io_trait;

pub type ProductionSessionManager = SessionManagerImpl<ProductionSessionManagerIo>;

pub struct SessionManagerImpl<Io: SessionManagerIo> {
    io: Arc<Io>,
    // TODO: evict terminal sessions after a grace period, the table only
    //  shrinks on logout right now
    sessions: RwLock<HashMap<Uuid, Arc<SessionSlot>>>,
}

struct SessionSlot {
    data: RwLock<Session>,
    refresh_gate: Mutex<()>,
}

#[derive(Clone, Debug)]
struct Session {
    user_id: String,
    email: String,
    display_name: String,
    role: Role,
    access_token: String,
    refresh_token: Option<String>,
    access_token_expires_at: OffsetDateTime,
    session_expires_at: OffsetDateTime,
    error: Option<SessionError>,
}

impl Session {
    fn view(&self) -> SessionView {
        SessionView {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            access_token: self.access_token.clone(),
            error: self.error,
        }
    }
}

impl<Io: SessionManagerIo> SessionManagerImpl<Io> {
    pub fn new_impl(io: Arc<Io>) -> Self {
        SessionManagerImpl {
            io,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn slot(&self, session_id: Uuid) -> Option<Arc<SessionSlot>> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
    }

    async fn mark_terminal(
        &self,
        slot: &SessionSlot,
        session_id: Uuid,
        error: SessionError,
    ) -> SessionError {
        let mut session = slot.data.write().await;
        match session.error {
            Some(existing) => existing,
            None => {
                warn!("session {session_id} entered terminal state: {error}");
                session.error = Some(error);
                error
            },
        }
    }
}

#[async_trait]
impl<Io: SessionManagerIo> SessionManager for SessionManagerImpl<Io> {
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        remember_me: bool,
    ) -> Result<(Uuid, SessionView), SessionError> {
        debug!("logging user \"{email}\" in");
        let tokens = self.io
            .exchange_credentials(email, password)
            .await
            .map_err(|e| {
                warn!("credential exchange for \"{email}\" failed: {e}");
                SessionError::AuthenticationFailed
            })?;
        let claims = AccessTokenClaims::parse(&tokens.access)
            .map_err(|e| {
                warn!("unusable access token issued for \"{email}\": {e}");
                SessionError::AuthenticationFailed
            })?;

        let now = self.io.get_time();
        let session_expires_at = now + if remember_me {
            EXTENDED_SESSION_VALIDITY_TIME
        } else {
            SESSION_VALIDITY_TIME
        };
        let session = Session {
            user_id: claims.user_id,
            email: claims.email.unwrap_or_else(|| email.to_string()),
            display_name: claims.display_name.unwrap_or_default(),
            role: claims.role,
            access_token: tokens.access,
            refresh_token: tokens.refresh,
            access_token_expires_at:
                access_expiry(claims.expires_at, now, session_expires_at),
            session_expires_at,
            error: None,
        };
        let view = session.view();

        let session_id = self.io.generate_uuid();
        self.sessions
            .write()
            .await
            .insert(
                session_id,
                Arc::new(
                    SessionSlot {
                        data: RwLock::new(session),
                        refresh_gate: Mutex::new(()),
                    }
                ),
            );
        info!(
            "logged user \"{email}\" in with session {session_id}, \
                session expires at {session_expires_at}",
        );
        Ok((session_id, view))
    }

    async fn valid_token(
        &self,
        session_id: Uuid,
    ) -> Result<String, SessionError> {
        let slot = self.slot(session_id)
            .await
            .ok_or(SessionError::UnknownSession)?;

        {
            let session = slot.data.read().await;
            if let Some(error) = session.error {
                return Err(error)
            }
            if self.io.get_time() < session.access_token_expires_at {
                return Ok(session.access_token.clone())
            }
        }

        // the access token has lapsed: exactly one caller refreshes, any
        // concurrent callers queue here and re-read the result
        let _gate = slot.refresh_gate.lock().await;
        let refresh_token = {
            let session = slot.data.read().await;
            if let Some(error) = session.error {
                return Err(error)
            }
            let now = self.io.get_time();
            if now < session.access_token_expires_at {
                // a caller ahead of us already refreshed
                return Ok(session.access_token.clone())
            }
            if now >= session.session_expires_at {
                drop(session);
                return Err(
                    self.mark_terminal(
                        &slot,
                        session_id,
                        SessionError::SessionExpired,
                    ).await
                )
            }
            session.refresh_token.clone()
        };
        let refresh_token = match refresh_token {
            Some(refresh_token) => refresh_token,
            None => {
                warn!("session {session_id} has no refresh credential");
                return Err(
                    self.mark_terminal(
                        &slot,
                        session_id,
                        SessionError::RefreshFailed,
                    ).await
                )
            },
        };

        debug!("refreshing access token for session {session_id}");
        let access_token = match self.io.refresh_access_token(&refresh_token).await {
            Ok(access_token) => access_token,
            Err(e) => {
                warn!("refresh for session {session_id} rejected: {e}");
                return Err(
                    self.mark_terminal(
                        &slot,
                        session_id,
                        SessionError::RefreshFailed,
                    ).await
                )
            },
        };

        let claimed_expiry = AccessTokenClaims::parse(&access_token)
            .ok()
            .and_then(|claims| claims.expires_at);
        let now = self.io.get_time();
        let mut session = slot.data.write().await;
        session.access_token_expires_at =
            access_expiry(claimed_expiry, now, session.session_expires_at);
        session.access_token = access_token;
        info!(
            "refreshed access token for session {session_id}, valid until {}",
            session.access_token_expires_at,
        );
        Ok(session.access_token.clone())
    }

    async fn hydrate(
        &self,
        session_id: Uuid,
    ) -> Option<SessionView> {
        let slot = self.slot(session_id).await?;
        let mut session = slot.data.write().await;
        if session.error.is_none()
            && self.io.get_time() >= session.session_expires_at
        {
            warn!("session {session_id} entered terminal state: {}", SessionError::SessionExpired);
            session.error = Some(SessionError::SessionExpired);
        }
        Some(session.view())
    }

    async fn logout(
        &self,
        session_id: Uuid,
    ) -> Result<bool, SessionError> {
        let did_exist = self.sessions
            .write()
            .await
            .remove(&session_id)
            .is_some();
        if did_exist {
            info!("session {session_id} deleted");
        } else {
            warn!("attempting to delete nonexistent session {session_id}");
        }
        Ok(did_exist)
    }
}

// an access token never outlives the session that owns it
fn access_expiry(
    claimed: Option<OffsetDateTime>,
    now: OffsetDateTime,
    session_expires_at: OffsetDateTime,
) -> OffsetDateTime {
    claimed
        .unwrap_or_else(|| now + ACCESS_TOKEN_FALLBACK_VALIDITY_TIME)
        .min(session_expires_at)
}

impl ProductionSessionManager {
    pub fn new(identity: IdentityClient) -> Self {
        SessionManagerImpl::new_impl(
            Arc::new(ProductionSessionManagerIo::new(identity)),
        )
    }
}
