use focusboard_core::{Config, CoreError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays parseable.
///
/// `RUST_LOG` wins; otherwise `--verbose` means debug and the config file's
/// `log.level` applies. A config that fails to load is reported once the
/// subscriber is up.
pub fn init(verbose: bool) {
    let mut config_error: Option<CoreError> = None;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            "debug".to_string()
        } else {
            match Config::load() {
                Ok(config) => config.log.level,
                Err(e) => {
                    config_error = Some(e);
                    Config::default().log.level
                }
            }
        };
        EnvFilter::new(format!("focusboard_core={level},focusboard={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Some(e) = config_error {
        warn!(error = %e, "config unreadable, using defaults");
    }
}
