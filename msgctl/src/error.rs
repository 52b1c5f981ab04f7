//! Error types for `msgctl`.

use message_source::MessageSourceError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Errors surfaced by `msgctl` commands.
#[derive(Debug, Error)]
pub enum MsgctlError {
    /// Settings, loading or lookup setup failed.
    #[error(transparent)]
    Messages(#[from] MessageSourceError),

    /// Logging could not be configured.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
