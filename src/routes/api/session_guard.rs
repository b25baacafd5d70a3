use async_trait::async_trait;
use rocket::{Request, State};
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use uuid::Uuid;
use crate::app_constants::SESSION_COOKIE_NAME;
use crate::session::{SessionManager, SessionView};

#[derive(Debug)]
pub enum MaybeAuthenticated {
    Active { session_id: Uuid, view: SessionView },
    Errored { session_id: Uuid, view: SessionView },
    Unauthenticated,
}

#[derive(Debug)]
pub struct Authenticated {
    pub session_id: Uuid,
    pub view: SessionView,
}

/// Admits dashboard traffic: an active session whose role carries
/// organizer access. Forwards otherwise so a fallback route can
/// redirect to login with the destination preserved.
#[derive(Debug)]
pub struct OrganizerAccess {
    pub session_id: Uuid,
    pub view: SessionView,
}

#[async_trait]
impl<'r> FromRequest<'r> for MaybeAuthenticated {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookie = match request.cookies().get_private(SESSION_COOKIE_NAME) {
            Some(cookie) => cookie,
            None => return Outcome::Success(MaybeAuthenticated::Unauthenticated),
        };
        let session_id = match Uuid::parse_str(cookie.value()) {
            Ok(session_id) => session_id,
            Err(_) => return Outcome::Success(MaybeAuthenticated::Unauthenticated),
        };
        let manager = try_outcome!(
            request.guard::<&State<Box<dyn SessionManager>>>().await
        );
        match manager.hydrate(session_id).await {
            Some(view) if view.error.is_none() =>
                Outcome::Success(MaybeAuthenticated::Active { session_id, view }),
            Some(view) =>
                Outcome::Success(MaybeAuthenticated::Errored { session_id, view }),
            None => Outcome::Success(MaybeAuthenticated::Unauthenticated),
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match try_outcome!(request.guard::<MaybeAuthenticated>().await) {
            MaybeAuthenticated::Active { session_id, view } =>
                Outcome::Success(Authenticated { session_id, view }),
            MaybeAuthenticated::Errored { .. } =>
                Outcome::Error((Status::Unauthorized, ())),
            MaybeAuthenticated::Unauthenticated =>
                Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for OrganizerAccess {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match try_outcome!(request.guard::<MaybeAuthenticated>().await) {
            MaybeAuthenticated::Active { session_id, view }
                if view.role.has_organizer_access() =>
                Outcome::Success(OrganizerAccess { session_id, view }),
            _ => Outcome::Forward(Status::Unauthorized),
        }
    }
}
