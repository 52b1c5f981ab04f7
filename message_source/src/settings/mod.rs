//! Configuration surface for building message sources.
//!
//! [`MessageSourceSettings`] is layered with `figment`: serialized defaults,
//! then an optional TOML file, then `MESSAGES_*` environment variables. List
//! settings accept comma-separated values from the environment.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::composite::CompositeMessageSource;
use crate::error::{MessageResult, MessageSourceError};
use crate::locale::{FixedLocale, Locale, parse_locale};
use crate::resource::{
    DEFAULT_RESOURCE_PATTERN, DirectoryEnumerator, Encoding, ResourceEnumerator, ResourceLoader,
    ResourcePattern,
};
use crate::source::MessageSource;
use crate::store::ResourceMessageSource;

mod list_env;

pub use list_env::ListEnv;

/// Prefix of the environment variables read by [`MessageSourceSettings::load`].
pub const ENV_PREFIX: &str = "MESSAGES_";

const LIST_KEYS: [&str; 3] = ["sources", "supported_locales", "resource_roots"];

/// Settings describing the sources of a composite and where their resources
/// live.
///
/// # Examples
///
/// ```rust
/// use message_source::settings::MessageSourceSettings;
///
/// let settings = MessageSourceSettings::default();
/// assert_eq!(settings.default_locale, "en");
/// assert!(settings.sources.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSourceSettings {
    /// Default locale of every source (`en`).
    pub default_locale: String,
    /// Locales to load; discovered from the resources when empty.
    pub supported_locales: Vec<String>,
    /// Source names in priority order.
    pub sources: Vec<String>,
    /// Namespace tried last for every code.
    pub common_namespace: Option<String>,
    /// Logical resource path pattern.
    pub resource_pattern: String,
    /// Encoding of the resource files.
    pub encoding: Encoding,
    /// Directories searched for resources, in order.
    pub resource_roots: Vec<Utf8PathBuf>,
}

impl Default for MessageSourceSettings {
    fn default() -> Self {
        Self {
            default_locale: String::from("en"),
            supported_locales: Vec::new(),
            sources: Vec::new(),
            common_namespace: None,
            resource_pattern: DEFAULT_RESOURCE_PATTERN.to_owned(),
            encoding: Encoding::default(),
            resource_roots: vec![Utf8PathBuf::from(".")],
        }
    }
}

impl MessageSourceSettings {
    /// Layered providers: defaults, then `config_file`, then the environment.
    #[must_use]
    pub fn figment(config_file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        let env = LIST_KEYS
            .into_iter()
            .fold(ListEnv::prefixed(ENV_PREFIX), ListEnv::list_key);
        figment.merge(env)
    }

    /// Loads settings from the layered providers.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::Settings`] when a provider fails or the
    /// merged values do not deserialize.
    pub fn load(config_file: Option<&Utf8Path>) -> MessageResult<Self> {
        Self::figment(config_file)
            .extract()
            .map_err(|err| MessageSourceError::Settings(Box::new(err)))
    }

    /// Parsed default locale.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::InvalidLocale`] when it does not parse.
    pub fn locale(&self) -> MessageResult<Locale> {
        parse_locale(&self.default_locale)
    }

    /// Parsed supported locales, or `None` when they should be discovered.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::InvalidLocale`] for the first entry that
    /// does not parse.
    pub fn locales(&self) -> MessageResult<Option<Vec<Locale>>> {
        if self.supported_locales.is_empty() {
            return Ok(None);
        }
        self.supported_locales
            .iter()
            .map(|value| parse_locale(value))
            .collect::<MessageResult<Vec<_>>>()
            .map(Some)
    }

    /// Validated resource path pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::InvalidPattern`] when it is unusable.
    pub fn pattern(&self) -> MessageResult<ResourcePattern> {
        ResourcePattern::new(self.resource_pattern.as_str())
    }

    /// Loader reading through `enumerator` with the configured pattern and
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::InvalidPattern`] when the pattern is
    /// unusable.
    pub fn loader(&self, enumerator: Arc<dyn ResourceEnumerator>) -> MessageResult<ResourceLoader> {
        Ok(ResourceLoader::new(enumerator)
            .with_pattern(self.pattern()?)
            .with_encoding(self.encoding))
    }

    /// One uninitialized store per configured source, in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::NoSources`] when no source is configured,
    /// or a validation error for an unparsable locale or pattern.
    pub fn stores(
        &self,
        enumerator: Arc<dyn ResourceEnumerator>,
    ) -> MessageResult<Vec<Arc<ResourceMessageSource>>> {
        if self.sources.is_empty() {
            return Err(MessageSourceError::NoSources);
        }
        let loader = self.loader(enumerator)?;
        let default_locale = self.locale()?;
        let locales = self.locales()?;
        Ok(self
            .sources
            .iter()
            .map(|name| {
                let store = ResourceMessageSource::new(name.as_str(), loader.clone(), default_locale.clone());
                let configured = match &locales {
                    Some(list) => store.with_supported_locales(list.iter().cloned()),
                    None => store,
                };
                Arc::new(configured)
            })
            .collect())
    }

    /// Builds, initializes and composes every configured source.
    ///
    /// # Errors
    ///
    /// Fails when the settings are invalid or any source fails to initialize.
    pub fn build(&self, enumerator: Arc<dyn ResourceEnumerator>) -> MessageResult<CompositeMessageSource> {
        let stores = self.stores(enumerator)?;
        for store in &stores {
            store.init()?;
        }
        let mut builder = CompositeMessageSource::builder()
            .members(
                stores
                    .into_iter()
                    .map(|store| store as Arc<dyn MessageSource>),
            )
            .resolver(Arc::new(FixedLocale::new(self.locale()?)));
        if let Some(namespace) = &self.common_namespace {
            builder = builder.common_namespace(namespace.as_str());
        }
        builder.build()
    }

    /// [`build`](Self::build) over a [`DirectoryEnumerator`] of
    /// [`resource_roots`](Self::resource_roots).
    ///
    /// # Errors
    ///
    /// Fails like [`build`](Self::build).
    pub fn build_from_roots(&self) -> MessageResult<CompositeMessageSource> {
        self.build(Arc::new(self.enumerator()))
    }

    /// Directory enumerator over the configured roots.
    #[must_use]
    pub fn enumerator(&self) -> DirectoryEnumerator {
        DirectoryEnumerator::new(self.resource_roots.iter().cloned())
    }
}
