use std::time::Duration;
use async_trait::async_trait;
use log::{error, info};
use rocket::{Build, Rocket};
use rocket::fairing::{Fairing, Info};
use tikogate::backend::BackendClient;
use tikogate::config::app_config::AppConfig;
use tikogate::config::app_config::data::AppConfigData;
use tikogate::identity::IdentityClient;
use tikogate::payment::{PaymentVerify, ProductionPaymentVerifier, VerificationConfig};
use tikogate::routes::{ApiRocketBuildExt, WebRocketBuildExt};
use tikogate::session::{ProductionSessionManager, SessionManager};

pub struct AppSetupFairing;

impl AppSetupFairing {
    pub fn new() -> Self {
        AppSetupFairing
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let config_data: AppConfigData = ok_or_bail!(
            rocket,
            rocket.figment().extract(),
            |e| error!("configuration is invalid: {e}")
        );
        let config = AppConfig::from(config_data);

        let http = ok_or_bail!(
            rocket,
            reqwest::Client::builder()
                .timeout(Duration::from_millis(config.request_timeout_ms))
                .build(),
            |e| error!("failed to build the backend http client: {e}")
        );
        let base_url = ok_or_bail!(
            rocket,
            reqwest::Url::parse(&config.backend_base_url),
            |e| error!("backend_base_url is invalid: {e}")
        );
        info!("fronting the platform API at {base_url}");

        let backend = BackendClient::new(http.clone(), base_url.clone());
        let session_manager: Box<dyn SessionManager> = Box::new(
            ProductionSessionManager::new(
                IdentityClient::new(http, base_url),
            )
        );
        let payment_verifier: Box<dyn PaymentVerify> = Box::new(
            ProductionPaymentVerifier::new(
                backend.clone(),
                VerificationConfig {
                    interval: Duration::from_millis(config.payment_poll_interval_ms),
                    max_attempts: config.payment_poll_max_attempts,
                },
            )
        );

        Ok(
            rocket
                .manage(config)
                .manage(session_manager)
                .manage(payment_verifier)
                .manage(backend)
                .install_tikogate_api()
                .install_tikogate_web()
        )
    }
}
