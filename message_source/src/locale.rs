//! Locale identifiers and the strategies that pick one for a lookup.
//!
//! Callers normally pass a [`Locale`] explicitly. When a lookup omits it, the
//! owning source asks its [`LocaleResolver`]: either a [`FixedLocale`] that
//! always answers with the configured default, or a [`LocaleContext`] carrying
//! a request-scoped locale that a web adapter threads through by reference.

use std::fmt;

use unic_langid::LanguageIdentifier;

use crate::error::{MessageResult, MessageSourceError};

/// Locale identifier used for every lookup (`en`, `zh-CN`, ...).
pub type Locale = LanguageIdentifier;

/// Supplies the locale used when a lookup does not name one.
///
/// Implementations never fail: a default locale is mandatory at
/// configuration time.
pub trait LocaleResolver: Send + Sync + fmt::Debug {
    /// Returns the effective locale for the calling context.
    fn locale(&self) -> Locale;
}

/// Resolver that always answers with the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(Locale);

impl FixedLocale {
    /// Creates a resolver for `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self(locale)
    }
}

impl LocaleResolver for FixedLocale {
    fn locale(&self) -> Locale {
        self.0.clone()
    }
}

/// Request-scoped locale with a mandatory default.
///
/// # Examples
///
/// ```rust
/// use message_source::{LocaleContext, LocaleResolver, langid};
///
/// let context = LocaleContext::new(langid!("en"));
/// assert_eq!(context.locale(), langid!("en"));
///
/// let scoped = context.with_request_locale(langid!("zh-CN"));
/// assert_eq!(scoped.locale(), langid!("zh-CN"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    request: Option<Locale>,
    default: Locale,
}

impl LocaleContext {
    /// Creates a context without a request locale.
    #[must_use]
    pub const fn new(default: Locale) -> Self {
        Self {
            request: None,
            default,
        }
    }

    /// Returns a copy of the context bound to `locale`.
    #[must_use]
    pub fn with_request_locale(&self, locale: Locale) -> Self {
        Self {
            request: Some(locale),
            default: self.default.clone(),
        }
    }

    /// Returns the request locale, if one was bound.
    #[must_use]
    pub const fn request_locale(&self) -> Option<&Locale> {
        self.request.as_ref()
    }

    /// Returns the configured default locale.
    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }
}

impl LocaleResolver for LocaleContext {
    fn locale(&self) -> Locale {
        self.request.as_ref().unwrap_or(&self.default).clone()
    }
}

/// Parses a locale written either as `zh_CN` or `zh-CN`.
///
/// # Errors
///
/// Returns [`MessageSourceError::InvalidLocale`] when `value` is not a valid
/// language identifier.
pub fn parse_locale(value: &str) -> MessageResult<Locale> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MessageSourceError::InvalidLocale {
            value: String::new(),
            message: String::from("locale must not be empty"),
        });
    }
    trimmed
        .replace('_', "-")
        .parse::<Locale>()
        .map_err(|err| MessageSourceError::InvalidLocale {
            value: trimmed.to_owned(),
            message: err.to_string(),
        })
}

/// Renders `locale` the way resource file names spell it (`zh_CN`).
#[must_use]
pub fn resource_suffix(locale: &Locale) -> String {
    locale.to_string().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use unic_langid::langid;

    #[rstest]
    #[case("en", langid!("en"))]
    #[case("zh_CN", langid!("zh-CN"))]
    #[case("zh-CN", langid!("zh-CN"))]
    #[case(" pt_BR ", langid!("pt-BR"))]
    fn parses_both_separators(#[case] raw: &str, #[case] expected: Locale) {
        assert_eq!(parse_locale(raw).expect("locale should parse"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("not a locale")]
    fn rejects_invalid_locales(#[case] raw: &str) {
        let err = parse_locale(raw).expect_err("locale should be rejected");
        assert!(matches!(err, MessageSourceError::InvalidLocale { .. }));
    }

    #[rstest]
    #[case(langid!("en"), "en")]
    #[case(langid!("zh-CN"), "zh_CN")]
    fn renders_resource_suffix(#[case] locale: Locale, #[case] expected: &str) {
        assert_eq!(resource_suffix(&locale), expected);
    }

    #[rstest]
    fn context_prefers_request_locale() {
        let context = LocaleContext::new(langid!("en"));
        assert!(context.request_locale().is_none());
        let scoped = context.with_request_locale(langid!("fr"));
        assert_eq!(scoped.locale(), langid!("fr"));
        assert_eq!(scoped.default_locale(), &langid!("en"));
        assert_eq!(context.locale(), langid!("en"));
    }

    #[rstest]
    fn fixed_locale_is_constant() {
        let resolver = FixedLocale::new(langid!("ja"));
        assert_eq!(resolver.locale(), langid!("ja"));
    }
}
