use std::str::FromStr;
use log::warn;
use rocket::{delete, get, post, put, routes, Build, Rocket, State};
use rocket::http::{Cookie, SameSite, Status};
use rocket::http::CookieJar;
use rocket::response::status;
use rocket::serde::json::Json;
use uuid::Uuid;
use crate::app_constants::{API_PREFIX, SESSION_COOKIE_NAME};
use crate::backend::BackendClient;
use crate::backend::BackendClientError;
use crate::backend::model::*;
use crate::data::EmailAddress;
use crate::payment::{PaymentVerify, PollSnapshot};
use crate::routes::api::model::{LoginRequestBody, TokenBody, TokenErrorBody};
use crate::routes::api::session_guard::{Authenticated, MaybeAuthenticated};
use crate::session::{SessionError, SessionManager, SessionView};

pub mod model;
pub mod session_guard;

type ManagedSessionManager = Box<dyn SessionManager>;
type ManagedPaymentVerify = Box<dyn PaymentVerify>;

#[post("/login", data = "<request>")]
async fn login(
    manager: &State<ManagedSessionManager>,
    jar: &CookieJar<'_>,
    request: Json<LoginRequestBody>,
) -> Result<Json<SessionView>, Status> {
    let request = request.into_inner();
    // a malformed address gets the same generic rejection as bad
    // credentials, nothing to learn from the response
    let email = EmailAddress::from_str(&request.email)
        .map_err(|_| Status::Unauthorized)?;
    let (session_id, view) = manager
        .login(&email, &request.password, request.remember_me)
        .await
        .map_err(|_| Status::Unauthorized)?;
    jar.add_private(
        Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
    );
    Ok(Json(view))
}

#[post("/logout")]
async fn logout(
    manager: &State<ManagedSessionManager>,
    jar: &CookieJar<'_>,
) -> status::NoContent {
    if let Some(cookie) = jar.get_private(SESSION_COOKIE_NAME) {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            let _ = manager.logout(session_id).await;
        }
        jar.remove_private(SESSION_COOKIE_NAME);
    }
    status::NoContent
}

#[get("/session")]
async fn session(auth: MaybeAuthenticated) -> Result<Json<SessionView>, Status> {
    match auth {
        MaybeAuthenticated::Active { view, .. }
        | MaybeAuthenticated::Errored { view, .. } => Ok(Json(view)),
        MaybeAuthenticated::Unauthenticated => Err(Status::Unauthorized),
    }
}

#[get("/token")]
async fn token(
    manager: &State<ManagedSessionManager>,
    auth: MaybeAuthenticated,
) -> Result<Json<TokenBody>, status::Custom<Json<TokenErrorBody>>> {
    let session_id = match auth {
        MaybeAuthenticated::Active { session_id, .. }
        | MaybeAuthenticated::Errored { session_id, .. } => session_id,
        MaybeAuthenticated::Unauthenticated => return Err(
            token_error(SessionError::UnknownSession)
        ),
    };
    manager
        .valid_token(session_id)
        .await
        .map(|access_token| Json(TokenBody { access_token }))
        .map_err(token_error)
}

fn token_error(
    error: SessionError,
) -> status::Custom<Json<TokenErrorBody>> {
    status::Custom(Status::Unauthorized, Json(TokenErrorBody { error }))
}

#[post("/payments/<payment_id>/verify")]
async fn verify_payment(
    verifier: &State<ManagedPaymentVerify>,
    _auth: Authenticated,
    payment_id: &str,
) -> Result<status::Accepted<Json<PollSnapshot>>, Status> {
    verifier.start(payment_id).await;
    let snapshot = verifier
        .status(payment_id)
        .await
        .map_err(payment_gateway_error)?;
    Ok(status::Accepted(Json(snapshot)))
}

#[get("/payments/<payment_id>/status")]
async fn payment_verification_status(
    verifier: &State<ManagedPaymentVerify>,
    _auth: Authenticated,
    payment_id: &str,
) -> Result<Json<PollSnapshot>, Status> {
    verifier
        .status(payment_id)
        .await
        .map(Json)
        .map_err(payment_gateway_error)
}

#[delete("/payments/<payment_id>/verify")]
async fn stop_payment_verification(
    verifier: &State<ManagedPaymentVerify>,
    _auth: Authenticated,
    payment_id: &str,
) -> status::NoContent {
    verifier.stop(payment_id).await;
    status::NoContent
}

fn payment_gateway_error(error: crate::payment::PaymentError) -> Status {
    warn!("payment status check failed: {error}");
    Status::BadGateway
}

#[get("/events?<search>&<page>")]
async fn list_events(
    backend: &State<BackendClient>,
    search: Option<String>,
    page: Option<u32>,
) -> Result<Json<Vec<EventSummary>>, Status> {
    backend
        .list_events(search.as_deref(), page)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[get("/events/<event_id>")]
async fn get_event(
    backend: &State<BackendClient>,
    event_id: &str,
) -> Result<Json<EventDetail>, Status> {
    backend.get_event(event_id).await.map(Json).map_err(bad_gateway)
}

#[post("/events", data = "<event>")]
async fn create_event(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    event: Json<NewEvent>,
) -> Result<Json<EventDetail>, Status> {
    let access_token = organizer_token(manager, &auth).await?;
    backend
        .create_event(&access_token, &event)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[put("/events/<event_id>", data = "<event>")]
async fn update_event(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    event_id: &str,
    event: Json<NewEvent>,
) -> Result<Json<EventDetail>, Status> {
    let access_token = organizer_token(manager, &auth).await?;
    backend
        .update_event(&access_token, event_id, &event)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[delete("/events/<event_id>")]
async fn delete_event(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    event_id: &str,
) -> Result<status::NoContent, Status> {
    let access_token = organizer_token(manager, &auth).await?;
    backend
        .delete_event(&access_token, event_id)
        .await
        .map(|()| status::NoContent)
        .map_err(bad_gateway)
}

#[get("/events/<event_id>/ticket-types")]
async fn ticket_types(
    backend: &State<BackendClient>,
    event_id: &str,
) -> Result<Json<Vec<TicketType>>, Status> {
    backend.ticket_types(event_id).await.map(Json).map_err(bad_gateway)
}

#[post("/events/<event_id>/registrations", data = "<registration>")]
async fn register_attendee(
    backend: &State<BackendClient>,
    event_id: &str,
    registration: Json<RegistrationRequest>,
) -> Result<Json<Registration>, Status> {
    backend
        .register_attendee(event_id, &registration)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[post("/payments", data = "<request>")]
async fn initiate_payment(
    backend: &State<BackendClient>,
    request: Json<PaymentInitRequest>,
) -> Result<Json<PaymentInitResponse>, Status> {
    backend
        .initiate_payment(&request)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[get("/analytics/summary?<event_id>")]
async fn analytics_summary(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    event_id: Option<String>,
) -> Result<Json<AnalyticsSummary>, Status> {
    let access_token = organizer_token(manager, &auth).await?;
    backend
        .analytics_summary(&access_token, event_id.as_deref())
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[get("/messages?<event_id>")]
async fn list_messages(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    event_id: Option<String>,
) -> Result<Json<Vec<Message>>, Status> {
    let access_token = bearer_token(manager, &auth).await?;
    backend
        .list_messages(&access_token, event_id.as_deref())
        .await
        .map(Json)
        .map_err(bad_gateway)
}

#[post("/messages", data = "<message>")]
async fn send_message(
    manager: &State<ManagedSessionManager>,
    backend: &State<BackendClient>,
    auth: Authenticated,
    message: Json<NewMessage>,
) -> Result<Json<Message>, Status> {
    let access_token = bearer_token(manager, &auth).await?;
    backend
        .send_message(&access_token, &message)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

async fn bearer_token(
    manager: &State<ManagedSessionManager>,
    auth: &Authenticated,
) -> Result<String, Status> {
    manager
        .valid_token(auth.session_id)
        .await
        .map_err(|_| Status::Unauthorized)
}

async fn organizer_token(
    manager: &State<ManagedSessionManager>,
    auth: &Authenticated,
) -> Result<String, Status> {
    if !auth.view.role.has_organizer_access() {
        return Err(Status::Forbidden)
    }
    bearer_token(manager, auth).await
}

fn bad_gateway(error: BackendClientError) -> Status {
    warn!("backend call failed: {error}");
    Status::BadGateway
}

pub trait ApiRocketBuildExt {
    fn install_tikogate_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_tikogate_api(self) -> Self {
        self.mount(
            API_PREFIX,
            routes![
                login,
                logout,
                session,
                token,
                verify_payment,
                payment_verification_status,
                stop_payment_verification,
                list_events,
                get_event,
                create_event,
                update_event,
                delete_event,
                ticket_types,
                register_attendee,
                initiate_payment,
                analytics_summary,
                list_messages,
                send_message,
            ]
        )
    }
}
