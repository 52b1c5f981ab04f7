//! The query interface shared by every message source.

use std::fmt;

use unic_langid::langid;

use crate::error::MessageResult;
use crate::event::{ReloadOutcome, ResourceChangeEvent};
use crate::locale::Locale;
use crate::pattern::{MessageArg, resolve_code};

/// Resolves message codes to localized text.
///
/// Only [`lookup`](Self::lookup) and the locale/source accessors are
/// required. Lifecycle hooks default to no-ops so read-only sources stay
/// small, and the convenience methods are built on `lookup`.
///
/// A miss is `None`, never an error, so callers can tell "not found" from a
/// message that is legitimately empty.
pub trait MessageSource: Send + Sync + fmt::Debug {
    /// Looks `code` up in `locale` and fills its `{}` placeholders from
    /// `args`.
    fn lookup(&self, code: &str, locale: &Locale, args: &[MessageArg<'_>]) -> Option<String>;

    /// Default locale of the source.
    fn default_locale(&self) -> Locale;

    /// Locales the source serves, starting with the default.
    fn supported_locales(&self) -> Vec<Locale>;

    /// Identifier of the source.
    fn source(&self) -> &str;

    /// Locale used when a lookup names none.
    fn locale(&self) -> Locale {
        self.default_locale()
    }

    /// Loads the source's messages.
    ///
    /// # Errors
    ///
    /// Implementations fail when their resources are missing or malformed.
    fn init(&self) -> MessageResult<()> {
        Ok(())
    }

    /// Drops every loaded message.
    fn destroy(&self) {}

    /// Reloads whatever part of the source `event` touches.
    ///
    /// # Errors
    ///
    /// Implementations fail when a changed resource cannot be loaded; the
    /// previously published messages stay in effect.
    fn reload(&self, _event: &ResourceChangeEvent) -> MessageResult<ReloadOutcome> {
        Ok(ReloadOutcome::unaffected())
    }

    /// Whether `identifier` names a resource backing this source.
    fn owns_resource(&self, _identifier: &str) -> bool {
        false
    }

    /// Looks `code` up in [`locale`](Self::locale).
    fn message(&self, code: &str, args: &[MessageArg<'_>]) -> Option<String> {
        self.lookup(code, &self.locale(), args)
    }

    /// Looks `code` up in [`locale`](Self::locale), formatting `fallback`
    /// when it is missing.
    fn message_or(&self, code: &str, args: &[MessageArg<'_>], fallback: &str) -> String {
        self.message(code, args)
            .unwrap_or_else(|| crate::pattern::format(fallback, args))
    }

    /// Resolves text that may be a `{code}` reference.
    ///
    /// Text without markers is returned as given. A reference is looked up in
    /// `locale` (or [`locale`](Self::locale) when `None`); when no message
    /// matches, the original text is returned unchanged.
    fn localize(&self, text: &str, locale: Option<&Locale>, args: &[MessageArg<'_>]) -> String {
        let Some(code) = resolve_code(text) else {
            return text.to_owned();
        };
        let resolved = locale.map_or_else(|| self.locale(), Clone::clone);
        self.lookup(code, &resolved, args).unwrap_or_else(|| {
            tracing::debug!(code, locale = %resolved, "message not found; keeping literal");
            text.to_owned()
        })
    }
}

/// Source that knows no messages.
///
/// Stands in wherever messages are requested before a real source has been
/// configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoOpMessageSource {
    locale: Locale,
}

impl NoOpMessageSource {
    /// Identifier reported by [`MessageSource::source`].
    pub const SOURCE: &'static str = "no-op";

    /// Creates a source reporting `locale` as its only locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Default for NoOpMessageSource {
    fn default() -> Self {
        Self::new(langid!("en"))
    }
}

impl MessageSource for NoOpMessageSource {
    fn lookup(&self, _code: &str, _locale: &Locale, _args: &[MessageArg<'_>]) -> Option<String> {
        None
    }

    fn default_locale(&self) -> Locale {
        self.locale.clone()
    }

    fn supported_locales(&self) -> Vec<Locale> {
        vec![self.locale.clone()]
    }

    fn source(&self) -> &str {
        Self::SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct Fixed(HashMap<&'static str, &'static str>);

    impl MessageSource for Fixed {
        fn lookup(&self, code: &str, locale: &Locale, args: &[MessageArg<'_>]) -> Option<String> {
            if *locale != langid!("en") {
                return None;
            }
            self.0
                .get(code)
                .map(|text| crate::pattern::format(text, args))
        }

        fn default_locale(&self) -> Locale {
            langid!("en")
        }

        fn supported_locales(&self) -> Vec<Locale> {
            vec![langid!("en")]
        }

        fn source(&self) -> &str {
            "fixed"
        }
    }

    fn fixed() -> Fixed {
        Fixed(HashMap::from([("a", "test-a"), ("hello", "Hello, {}")]))
    }

    #[rstest]
    #[case("{a}", "test-a")]
    #[case("{code-not-found}", "{code-not-found}")]
    #[case("{ns.code-not-found}", "{ns.code-not-found}")]
    #[case("plain text", "plain text")]
    #[case("{unbalanced", "{unbalanced")]
    fn localizes_references_and_literals(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(fixed().localize(text, None, &[]), expected);
    }

    #[rstest]
    fn localize_uses_requested_locale() {
        assert_eq!(fixed().localize("{a}", Some(&langid!("fr")), &[]), "{a}");
    }

    #[rstest]
    fn message_formats_arguments() {
        assert_eq!(
            fixed().message("hello", &[&"Ada"]).as_deref(),
            Some("Hello, Ada")
        );
        assert_eq!(fixed().message_or("missing", &[&1], "fallback {}"), "fallback 1");
    }

    #[rstest]
    fn no_op_source_knows_nothing() {
        let source = NoOpMessageSource::default();
        assert_eq!(source.message("a", &[]), None);
        assert_eq!(source.localize("{a}", None, &[]), "{a}");
        assert_eq!(source.supported_locales(), vec![source.default_locale()]);
        assert!(source.init().is_ok());
        assert!(source.reload(&ResourceChangeEvent::new(["x"])).expect("reload").is_unaffected());
    }
}
