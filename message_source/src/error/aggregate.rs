//! Aggregation container for several [`MessageSourceError`] values.

use std::{error::Error, fmt};

use super::MessageSourceError;

/// Collection of errors raised while one change event was being applied.
///
/// # Examples
///
/// ```
/// use message_source::MessageSourceError;
///
/// let err = MessageSourceError::try_aggregate(vec![
///     MessageSourceError::NoSources,
///     MessageSourceError::Destroyed { source_name: "user".into() },
/// ]);
/// if let Some(MessageSourceError::Aggregate(all)) = err {
///     assert_eq!(all.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<MessageSourceError>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<MessageSourceError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &MessageSourceError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl IntoIterator for AggregatedErrors {
    type Item = MessageSourceError;
    type IntoIter = std::vec::IntoIter<MessageSourceError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MessageSourceError {
    /// Folds a list of errors into a single error.
    ///
    /// Returns `None` for an empty list, the sole error for a single-element
    /// list, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        match collected.len() {
            0 => None,
            1 => collected.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }
}
