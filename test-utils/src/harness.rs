use std::sync::Arc;
use std::time::Duration;
use rocket::{Build, Rocket};
use tikogate::backend::BackendClient;
use tikogate::payment::{PaymentVerifierImpl, PaymentVerify, VerificationConfig};
use tikogate::routes::{ApiRocketBuildExt, WebRocketBuildExt};
use tikogate::session::{SessionManager, SessionManagerImpl};
use crate::stub::{StubIdentityIo, StubPaymentIo};

/// The daemon's ignite wiring with the outbound HTTP edges stubbed.
/// The backend client points nowhere; routes that would proxy to it
/// are not meant to be driven through this harness.
pub fn test_rocket(
    identity: StubIdentityIo,
    payment: StubPaymentIo,
) -> Rocket<Build> {
    let session_manager: Box<dyn SessionManager> = Box::new(
        SessionManagerImpl::new_impl(Arc::new(identity)),
    );
    let payment_verifier: Box<dyn PaymentVerify> = Box::new(
        PaymentVerifierImpl::new_impl(
            Arc::new(payment),
            VerificationConfig {
                interval: Duration::from_millis(5),
                max_attempts: 5,
            },
        )
    );
    let backend = BackendClient::new(
        reqwest::Client::new(),
        reqwest::Url::parse("http://backend.invalid/api/").expect("static url"),
    );
    rocket::build()
        .manage(session_manager)
        .manage(payment_verifier)
        .manage(backend)
        .install_tikogate_api()
        .install_tikogate_web()
}
