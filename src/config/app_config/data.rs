use serde::{Deserialize, Serialize};
use crate::app_constants::{PAYMENT_POLL_INTERVAL, PAYMENT_POLL_MAX_ATTEMPTS};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppConfigData {
    pub backend_base_url: String,
    pub request_timeout_ms: u64,
    pub payment_poll_interval_ms: u64,
    pub payment_poll_max_attempts: u32,
}

impl Default for AppConfigData {
    fn default() -> Self {
        AppConfigData {
            backend_base_url: "http://127.0.0.1:8000/api/".to_owned(),
            request_timeout_ms: 10_000,
            payment_poll_interval_ms: PAYMENT_POLL_INTERVAL.as_millis() as u64,
            payment_poll_max_attempts: PAYMENT_POLL_MAX_ATTEMPTS,
        }
    }
}
