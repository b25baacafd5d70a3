use boolean_enums::gen_boolean_enum;
use log::LevelFilter;
use syslog::Facility;

gen_boolean_enum!(pub IsDaemonizing);

pub fn init_tool_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(default_level())
        .init()
}

pub fn init_daemon_logging(is_daemonizing: IsDaemonizing) {
    if is_daemonizing.into() {
        syslog::init(
            Facility::LOG_DAEMON,
            default_level(),
            Some(clap::crate_name!()),
        ).expect("syslog initialization failed");
    } else {
        init_tool_logging();
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
