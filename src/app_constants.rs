use time::Duration;

pub const SESSION_VALIDITY_TIME: Duration = Duration::hours(12);
pub const EXTENDED_SESSION_VALIDITY_TIME: Duration = Duration::days(30);
pub const ACCESS_TOKEN_FALLBACK_VALIDITY_TIME: Duration = Duration::minutes(15);

pub const PAYMENT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);
pub const PAYMENT_POLL_MAX_ATTEMPTS: u32 = 60;

pub const SESSION_COOKIE_NAME: &str = "tikogate_session";

pub const API_PREFIX: &str = "/api";
pub const WEB_PREFIX: &str = "/";
