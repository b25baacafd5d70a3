use crate::config::app_config::data::AppConfigData;

pub mod data;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub request_timeout_ms: u64,
    pub payment_poll_interval_ms: u64,
    pub payment_poll_max_attempts: u32,
}

impl From<AppConfigData> for AppConfig {
    fn from(value: AppConfigData) -> Self {
        let mut backend_base_url = value.backend_base_url;
        // joining relative endpoint paths needs a directory-style base
        if !backend_base_url.ends_with('/') {
            backend_base_url.push('/');
        }
        AppConfig {
            backend_base_url,
            request_timeout_ms: value.request_timeout_ms,
            payment_poll_interval_ms: value.payment_poll_interval_ms,
            payment_poll_max_attempts: value.payment_poll_max_attempts,
        }
    }
}
