//! Tracing subscriber setup

use crate::config::{LogConfig, LogFormat};
use crate::error::{ConsoleError, ConsoleResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// # Errors
/// - `ConsoleError::Telemetry` if the filter is invalid or a global
///   subscriber is already installed
pub fn init(config: &LogConfig) -> ConsoleResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| ConsoleError::Telemetry(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ConsoleError::Telemetry(e.to_string()))?;

    tracing::debug!(filter = %config.filter, format = ?config.format, "telemetry initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_cleanly() {
        let config = LogConfig::default();
        let _ = init(&config);
        assert!(matches!(init(&config), Err(ConsoleError::Telemetry(_))));
    }
}
