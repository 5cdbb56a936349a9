use crate::config::{Config, ConfigError};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `config.log_filter`.
///
/// Returns `Ok(false)` if a global subscriber was already set.
pub fn init_tracing(config: &Config) -> Result<bool, ConfigError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        ConfigError::InvalidValue("RUST_LOG".to_string(), e.to_string())
    })?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok())
}
