//! Primary error enum for message source lifecycles.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::locale::Locale;

/// Errors that can occur while configuring, loading, or reloading messages.
///
/// Lookup misses are not errors: they surface as `None` from
/// [`crate::MessageSource::lookup`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MessageSourceError {
    /// The default locale of a source has no resource at all.
    #[error("source '{source_name}' has no resource for its default locale {locale} ('{resource}')")]
    MissingDefaultResource {
        /// Source whose default catalogue is missing.
        source_name: String,
        /// Default locale of the source.
        locale: Locale,
        /// Logical resource name that was searched for.
        resource: String,
    },

    /// A resource was discovered but could not be read or decoded.
    #[error("failed to load '{resource}' for source '{source_name}' ({locale}): {source}")]
    Load {
        /// Source being loaded.
        source_name: String,
        /// Locale being loaded.
        locale: Locale,
        /// Identifier of the failing resource.
        resource: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The resource directory of a source could not be listed.
    #[error("failed to discover locales for source '{source_name}' under '{directory}': {source}")]
    Discovery {
        /// Source whose locales were being discovered.
        source_name: String,
        /// Logical directory that was listed.
        directory: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A resource was read but is not a valid properties document.
    #[error("failed to parse '{resource}' for source '{source_name}' ({locale}) at line {line}: {message}")]
    Parse {
        /// Source being loaded.
        source_name: String,
        /// Locale being loaded.
        locale: Locale,
        /// Identifier of the failing resource.
        resource: String,
        /// One-based line number of the offending entry.
        line: usize,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A catalogue declares a code that can never be looked up unambiguously.
    #[error("source '{source_name}' declares invalid message code '{code}' in '{resource}': {reason}")]
    InvalidCode {
        /// Source declaring the code.
        source_name: String,
        /// Offending code.
        code: String,
        /// Resource declaring the code.
        resource: String,
        /// Why the code was rejected.
        reason: &'static str,
    },

    /// A locale identifier could not be parsed.
    #[error("invalid locale '{value}': {message}")]
    InvalidLocale {
        /// Raw text that failed to parse.
        value: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A resource path pattern is unusable.
    #[error("invalid resource pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        message: String,
    },

    /// A composite was configured without member sources.
    #[error("no message sources configured")]
    NoSources,

    /// A lifecycle operation was attempted on a destroyed source.
    #[error("message source '{source_name}' has been destroyed")]
    Destroyed {
        /// Destroyed source.
        source_name: String,
    },

    /// Settings could not be extracted from their providers.
    #[error("failed to load message source settings: {0}")]
    Settings(#[from] Box<FigmentError>),

    /// Several member sources failed while handling one change event.
    #[error("multiple message source errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
