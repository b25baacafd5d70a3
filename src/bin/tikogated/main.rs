mod app_setup;
mod cli;

use app_setup::AppSetupFairing;
use clap::{crate_name, Parser};
use cli::CliConfig;
use log::info;
use rocket::figment::Figment;
use tikogate::config::figment::FigmentExt;
use tikogate::error_exit;
use tikogate::logging::{init_daemon_logging, IsDaemonizing};

fn main() {
    let cli_config = CliConfig::parse();
    init_daemon_logging(IsDaemonizing::from(!cli_config.foreground));

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);

    let result = rocket::execute(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing::new())
            .launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }

    info!("{} terminating normally", crate_name!());
}
