//! Error types produced while building, loading, and reloading message sources.

mod aggregate;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::MessageSourceError;

/// Result alias used throughout the crate.
pub type MessageResult<T> = Result<T, MessageSourceError>;

#[cfg(test)]
mod tests;
