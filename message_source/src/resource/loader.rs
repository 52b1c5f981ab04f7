//! Loads and merges the resources of one source and locale.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Encoding, ResourceEnumerator, ResourceId, ResourcePattern};
use crate::error::{MessageResult, MessageSourceError};
use crate::locale::Locale;
use crate::properties::{self, PropertyEntry};

/// One decoded and parsed resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedResource {
    /// Where the resource was found.
    pub id: ResourceId,
    /// Entries in document order.
    pub entries: Vec<PropertyEntry>,
}

/// Messages of every resource for one source and locale, merged in
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedResources {
    /// Merged `code → text` map; later resources override earlier ones.
    pub messages: HashMap<String, String>,
    /// Resources that contributed, in discovery order.
    pub resources: Vec<ResourceId>,
}

/// Turns logical resource names into parsed message maps.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use message_source::langid;
/// use message_source::resource::{MemoryEnumerator, ResourceLoader};
///
/// let resources = MemoryEnumerator::new()
///     .with_origin("core", "i18n/user/i18n_messages_en.properties", "a=1\nb=2")
///     .with_origin("plugin", "i18n/user/i18n_messages_en.properties", "b=3");
/// let loader = ResourceLoader::new(Arc::new(resources));
/// let merged = loader
///     .load_merged("user", &langid!("en"))
///     .expect("resources should load")
///     .expect("resources exist");
/// assert_eq!(merged.messages["a"], "1");
/// assert_eq!(merged.messages["b"], "3");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    enumerator: Arc<dyn ResourceEnumerator>,
    pattern: ResourcePattern,
    encoding: Encoding,
}

impl ResourceLoader {
    /// Creates a loader using the default pattern and UTF-8.
    #[must_use]
    pub fn new(enumerator: Arc<dyn ResourceEnumerator>) -> Self {
        Self {
            enumerator,
            pattern: ResourcePattern::default(),
            encoding: Encoding::default(),
        }
    }

    /// Replaces the resource path pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: ResourcePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Replaces the resource encoding.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Pattern used to name resources.
    #[must_use]
    pub const fn pattern(&self) -> &ResourcePattern {
        &self.pattern
    }

    /// Encoding used to decode resources.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Logical resource name for `source` in `locale`.
    #[must_use]
    pub fn resource_name(&self, source: &str, locale: &Locale) -> String {
        self.pattern.resource_name(source, locale)
    }

    /// Loads every resource for `source` in `locale`, in discovery order.
    ///
    /// An absent resource yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::Load`] when a discovered resource cannot
    /// be read or decoded, [`MessageSourceError::Parse`] when it is not a
    /// valid properties document, and [`MessageSourceError::InvalidCode`]
    /// when it declares an unusable code.
    pub fn load_all(&self, source: &str, locale: &Locale) -> MessageResult<Vec<LoadedResource>> {
        let name = self.resource_name(source, locale);
        let load_error = |resource: String, err: std::io::Error| MessageSourceError::Load {
            source_name: source.to_owned(),
            locale: locale.clone(),
            resource,
            source: err,
        };
        let ids = self
            .enumerator
            .resources(&name)
            .map_err(|err| load_error(name.clone(), err))?;
        let mut loaded = Vec::with_capacity(ids.len());
        for id in ids {
            let text = self
                .enumerator
                .read(&id)
                .and_then(|bytes| self.encoding.decode(bytes))
                .map_err(|err| load_error(id.to_string(), err))?;
            let entries = properties::parse(&text).map_err(|err| MessageSourceError::Parse {
                source_name: source.to_owned(),
                locale: locale.clone(),
                resource: id.to_string(),
                line: err.line,
                message: err.message,
            })?;
            for entry in &entries {
                validate_code(source, &id, &entry.key)?;
            }
            tracing::debug!(
                source,
                locale = %locale,
                resource = %id,
                entries = entries.len(),
                "loaded message resource"
            );
            loaded.push(LoadedResource { id, entries });
        }
        Ok(loaded)
    }

    /// Loads and merges every resource for `source` in `locale`.
    ///
    /// Returns `None` when no resource exists.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`Self::load_all`].
    pub fn load_merged(
        &self,
        source: &str,
        locale: &Locale,
    ) -> MessageResult<Option<MergedResources>> {
        let loaded = self.load_all(source, locale)?;
        if loaded.is_empty() {
            return Ok(None);
        }
        let mut merged = MergedResources::default();
        for resource in loaded {
            for entry in resource.entries {
                merged.messages.insert(entry.key, entry.value);
            }
            merged.resources.push(resource.id);
        }
        Ok(Some(merged))
    }

    /// Lists the locales that have at least one resource for `source`.
    ///
    /// Locales are returned sorted by their resource file names.
    ///
    /// # Errors
    ///
    /// Returns [`MessageSourceError::Discovery`] when the resource directory
    /// exists but cannot be listed.
    pub fn discover_locales(&self, source: &str) -> MessageResult<Vec<Locale>> {
        let directory = self.pattern.directory(source);
        let files = self
            .enumerator
            .list(&directory)
            .map_err(|err| MessageSourceError::Discovery {
                source_name: source.to_owned(),
                directory: directory.clone(),
                source: err,
            })?;
        let mut locales = Vec::new();
        for file in files {
            match self.pattern.locale_from_file_name(source, &file) {
                Some(locale) if !locales.contains(&locale) => locales.push(locale),
                Some(_) => {}
                None => tracing::debug!(source, file = %file, "ignoring unrelated file"),
            }
        }
        Ok(locales)
    }
}

fn validate_code(source: &str, id: &ResourceId, code: &str) -> MessageResult<()> {
    let invalid = |reason: &'static str| MessageSourceError::InvalidCode {
        source_name: source.to_owned(),
        code: code.to_owned(),
        resource: id.to_string(),
        reason,
    };
    if code.trim().is_empty() {
        return Err(invalid("message codes must not be empty"));
    }
    if code.starts_with('{') && code.ends_with('}') {
        return Err(invalid("message codes must not be wrapped in {} markers"));
    }
    Ok(())
}
