pub const DEFAULT_CONFIG_FILE: &str = "/etc/tikogate/tikogate.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "TIKOGATE_";
