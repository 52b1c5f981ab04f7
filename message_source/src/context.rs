//! Explicitly passed handle to the application's message source.

use std::sync::Arc;

use crate::locale::{Locale, LocaleContext, LocaleResolver};
use crate::pattern::MessageArg;
use crate::source::{MessageSource, NoOpMessageSource};

/// Cheaply cloneable handle that call sites receive instead of reaching for a
/// process-wide singleton.
///
/// Build one at startup and pass it down. Until a real source exists,
/// [`MessageContext::unconfigured`] stands in and resolves nothing.
///
/// # Examples
///
/// ```rust
/// use message_source::{LocaleContext, MessageContext, langid};
///
/// let messages = MessageContext::unconfigured();
/// assert!(!messages.is_configured());
/// assert_eq!(messages.message("greeting", &[]), None);
///
/// let request = LocaleContext::new(langid!("en")).with_request_locale(langid!("fr"));
/// assert_eq!(messages.localize_for(&request, "{greeting}", &[]), "{greeting}");
/// ```
#[derive(Debug, Clone)]
pub struct MessageContext {
    source: Arc<dyn MessageSource>,
    configured: bool,
}

impl MessageContext {
    /// Wraps an initialized source.
    #[must_use]
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self {
            source,
            configured: true,
        }
    }

    /// Context backed by [`NoOpMessageSource`].
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            source: Arc::new(NoOpMessageSource::default()),
            configured: false,
        }
    }

    /// Whether a real source backs this context.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.configured
    }

    /// The backing source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn MessageSource> {
        &self.source
    }

    /// Looks `code` up in an explicit `locale`.
    #[must_use]
    pub fn lookup(&self, code: &str, locale: &Locale, args: &[MessageArg<'_>]) -> Option<String> {
        self.source.lookup(code, locale, args)
    }

    /// Looks `code` up in the source's current locale.
    #[must_use]
    pub fn message(&self, code: &str, args: &[MessageArg<'_>]) -> Option<String> {
        self.source.message(code, args)
    }

    /// Resolves `{code}` text in the source's current locale.
    #[must_use]
    pub fn localize(&self, text: &str, args: &[MessageArg<'_>]) -> String {
        self.source.localize(text, None, args)
    }

    /// Resolves `{code}` text in the locale carried by a request context.
    #[must_use]
    pub fn localize_for(&self, request: &LocaleContext, text: &str, args: &[MessageArg<'_>]) -> String {
        self.source.localize(text, Some(&request.locale()), args)
    }
}

impl Default for MessageContext {
    fn default() -> Self {
        Self::unconfigured()
    }
}
