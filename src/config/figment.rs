use std::path::Path;
use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use crate::bin_constants::APP_CONFIG_ENV_PREFIX;
use crate::config::app_config::data::AppConfigData;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.merge(Serialized::defaults(AppConfigData::default()))
            .merge(Toml::file_exact(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }
}

#[cfg(test)]
mod tests {
    use rocket::figment::Jail;
    use super::*;

    #[test]
    fn file_overrides_defaults_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tikogate.toml",
                r#"
                    backend_base_url = "http://api.internal:9000/v1/"
                    payment_poll_max_attempts = 30
                "#,
            )?;
            jail.set_env("TIKOGATE_PAYMENT_POLL_MAX_ATTEMPTS", "12");

            let data: AppConfigData = Figment::new()
                .setup_app_config("tikogate.toml")
                .extract()?;

            assert_eq!(data.backend_base_url, "http://api.internal:9000/v1/");
            assert_eq!(data.payment_poll_max_attempts, 12);
            assert_eq!(data.request_timeout_ms, AppConfigData::default().request_timeout_ms);
            Ok(())
        });
    }
}
