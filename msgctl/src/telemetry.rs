//! Diagnostic logging for the command-line tool.

use std::io::{self, IsTerminal};

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MSGCTL_LOG";

/// Filter used when [`LOG_ENV`] is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Errors encountered while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Builds the filter from `value`, falling back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `value` is not a valid directive.
pub fn filter(value: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(value.unwrap_or(DEFAULT_FILTER))
        .map_err(|error| TelemetryError::Filter(error.to_string()))
}

/// Installs a compact stderr subscriber filtered by [`LOG_ENV`].
///
/// # Errors
///
/// Fails when the filter is invalid or a subscriber is already installed.
pub fn initialise() -> Result<(), TelemetryError> {
    let configured = std::env::var(LOG_ENV).ok();
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter(configured.as_deref())?)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("message_source=debug,msgctl=info"))]
    fn accepts_valid_filters(#[case] value: Option<&str>) {
        assert!(filter(value).is_ok());
    }

    #[rstest]
    fn rejects_invalid_filters() {
        assert!(matches!(
            filter(Some("message_source=notalevel")),
            Err(TelemetryError::Filter(_))
        ));
    }
}
