//! Logical resource path patterns parameterised by source and locale.

use crate::error::{MessageResult, MessageSourceError};
use crate::locale::{Locale, parse_locale, resource_suffix};

/// Pattern used when none is configured.
pub const DEFAULT_RESOURCE_PATTERN: &str = "i18n/{source}/i18n_messages_{locale}.properties";

const SOURCE_SLOT: &str = "{source}";
const LOCALE_SLOT: &str = "{locale}";

/// Logical path pattern such as `i18n/{source}/i18n_messages_{locale}.properties`.
///
/// `{locale}` must appear exactly once, in the final path segment, so the
/// locales available for a source can be read back from file names.
///
/// # Examples
///
/// ```rust
/// use message_source::langid;
/// use message_source::resource::ResourcePattern;
///
/// let pattern = ResourcePattern::default();
/// assert_eq!(
///     pattern.resource_name("user", &langid!("zh-CN")),
///     "i18n/user/i18n_messages_zh_CN.properties"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePattern {
    template: String,
}

impl ResourcePattern {
    /// Validates and wraps `template`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::InvalidPattern`] when `{locale}` is
    /// missing, repeated, or outside the final path segment.
    pub fn new(template: impl Into<String>) -> MessageResult<Self> {
        let text: String = template.into();
        let invalid = |message: &str| MessageSourceError::InvalidPattern {
            pattern: text.clone(),
            message: message.to_owned(),
        };
        match text.matches(LOCALE_SLOT).count() {
            0 => return Err(invalid("pattern must contain {locale}")),
            1 => {}
            _ => return Err(invalid("pattern must contain {locale} only once")),
        }
        let (_, file) = split_directory(&text);
        if !file.contains(LOCALE_SLOT) {
            return Err(invalid("{locale} must appear in the file name"));
        }
        if text.starts_with('/') {
            return Err(invalid("pattern must be relative"));
        }
        Ok(Self { template: text })
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Logical name of the resource for `source` in `locale`.
    #[must_use]
    pub fn resource_name(&self, source: &str, locale: &Locale) -> String {
        self.with_source(source)
            .replace(LOCALE_SLOT, &resource_suffix(locale))
    }

    /// Logical directory holding the resources of `source`.
    #[must_use]
    pub fn directory(&self, source: &str) -> String {
        let (directory, _) = split_directory(&self.template);
        directory.replace(SOURCE_SLOT, source)
    }

    /// Extracts the locale from a file name produced by this pattern.
    ///
    /// Only names this pattern would render for the returned locale are
    /// accepted: the embedded locale must be in resource-suffix form
    /// (`zh_CN`) with a two- or three-letter language. With a flat pattern
    /// such as `{source}_{locale}.properties` this keeps `user` from
    /// claiming `user_admin_fr.properties`, whose remainder `admin_fr` is not
    /// a rendered locale.
    ///
    /// Returns `None` when `file_name` does not fit the pattern or the
    /// embedded locale does not parse.
    #[must_use]
    pub fn locale_from_file_name(&self, source: &str, file_name: &str) -> Option<Locale> {
        let (_, file) = split_directory(&self.template);
        let resolved = file.replace(SOURCE_SLOT, source);
        let (prefix, suffix) = resolved.split_once(LOCALE_SLOT)?;
        let raw = file_name.strip_prefix(prefix)?.strip_suffix(suffix)?;
        if raw.is_empty() {
            return None;
        }
        let locale = parse_locale(raw).ok()?;
        let rendered = resource_suffix(&locale) == raw;
        let short_language = locale.language.as_str().len() <= 3;
        (rendered && short_language).then_some(locale)
    }

    fn with_source(&self, source: &str) -> String {
        self.template.replace(SOURCE_SLOT, source)
    }
}

impl Default for ResourcePattern {
    fn default() -> Self {
        Self {
            template: DEFAULT_RESOURCE_PATTERN.to_owned(),
        }
    }
}

fn split_directory(template: &str) -> (&str, &str) {
    template.rsplit_once('/').unwrap_or(("", template))
}
