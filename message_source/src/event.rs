//! Change events consumed by message sources and the notifications they emit.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::locale::Locale;

/// Inbound notification that some backing resources changed.
///
/// Identifiers are opaque strings as rendered by
/// [`ResourceId`](crate::resource::ResourceId) (`<origin>!/<name>`), or bare
/// logical names when the origin is unknown.
///
/// # Examples
///
/// ```rust
/// use message_source::ResourceChangeEvent;
///
/// let event = ResourceChangeEvent::new(["i18n/user/i18n_messages_en.properties"]);
/// assert_eq!(event.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceChangeEvent {
    changed: BTreeSet<String>,
}

impl ResourceChangeEvent {
    /// Creates an event naming `changed` resources.
    #[must_use]
    pub fn new<I, S>(changed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            changed: changed.into_iter().map(Into::into).collect(),
        }
    }

    /// Changed identifiers in sorted order.
    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    /// Number of distinct changed identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changed.len()
    }

    /// Whether the event names no resource.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Emitted by a store after it published a reloaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesReloaded {
    /// Source that reloaded.
    pub source: String,
    /// Locales whose maps were rebuilt.
    pub locales: Vec<Locale>,
    /// Identifiers from the triggering event that the source owns.
    pub resources: Vec<String>,
}

/// Callback invoked after each successful reload.
pub type ReloadListener = Arc<dyn Fn(&MessagesReloaded) + Send + Sync>;

/// Result of offering a change event to a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadOutcome {
    reloaded: Vec<MessagesReloaded>,
}

impl ReloadOutcome {
    /// Outcome for a source that owns none of the changed resources.
    #[must_use]
    pub const fn unaffected() -> Self {
        Self {
            reloaded: Vec::new(),
        }
    }

    /// Outcome for a single completed reload.
    #[must_use]
    pub fn reloaded(notice: MessagesReloaded) -> Self {
        Self {
            reloaded: vec![notice],
        }
    }

    /// Whether nothing was reloaded.
    #[must_use]
    pub fn is_unaffected(&self) -> bool {
        self.reloaded.is_empty()
    }

    /// Notifications for every source that reloaded.
    #[must_use]
    pub fn notifications(&self) -> &[MessagesReloaded] {
        &self.reloaded
    }

    /// Names of the sources that reloaded.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.reloaded.iter().map(|notice| notice.source.as_str())
    }

    /// Appends the notifications of `other`.
    pub fn merge(&mut self, other: Self) {
        self.reloaded.extend(other.reloaded);
    }
}
