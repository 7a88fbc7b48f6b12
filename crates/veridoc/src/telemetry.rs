use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Failures raised while installing the global tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the process-wide subscriber. `RUST_LOG` wins over the configured
/// level so operators can raise verbosity without redeploying.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
            value: config.log_level.clone(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}
