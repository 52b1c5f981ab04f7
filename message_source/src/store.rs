//! Message store backed by the properties resources of one named source.
//!
//! The store publishes an immutable snapshot per load. Readers clone the
//! current `Arc<Snapshot>` under a short read lock and then work lock-free;
//! reloads build a complete replacement off to the side and publish it with
//! one write, so a reader sees either the old maps or the new ones, never a
//! mixture. Reloads of one store are serialized by a dedicated mutex.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{MessageResult, MessageSourceError};
use crate::event::{MessagesReloaded, ReloadListener, ReloadOutcome, ResourceChangeEvent};
use crate::locale::Locale;
use crate::pattern::{MessageArg, format};
use crate::resource::{ResourceId, ResourceLoader, logical_name};
use crate::source::MessageSource;

/// Messages for one locale together with the resources they came from.
#[derive(Debug, Clone)]
struct Catalogue {
    /// Logical resource name for this locale.
    name: String,
    /// Resources that contributed, in discovery order.
    resources: Vec<ResourceId>,
    messages: Arc<HashMap<String, String>>,
}

impl Catalogue {
    fn owns(&self, identifier: &str) -> bool {
        logical_name(identifier) == self.name || self.resources.iter().any(|id| id.matches(identifier))
    }
}

#[derive(Debug)]
struct Snapshot {
    locales: Vec<Locale>,
    catalogues: HashMap<Locale, Catalogue>,
}

impl Snapshot {
    fn owns(&self, identifier: &str) -> bool {
        self.catalogues
            .values()
            .any(|catalogue| catalogue.owns(identifier))
    }
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Initialized(Arc<Snapshot>),
    Destroyed,
}

/// Single-source message store.
///
/// Each locale's map is the default locale's messages overlaid with that
/// locale's own messages. Lookups never fall back to another locale.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use message_source::resource::{MemoryEnumerator, ResourceLoader};
/// use message_source::{MessageSource, ResourceMessageSource, langid};
///
/// let resources = MemoryEnumerator::new()
///     .with("i18n/user/i18n_messages_en.properties", "hello=Hello, {}")
///     .with("i18n/user/i18n_messages_zh_CN.properties", "hello=你好，{}");
/// let store = ResourceMessageSource::new("user", ResourceLoader::new(Arc::new(resources)), langid!("en"));
/// store.init().expect("resources should load");
///
/// assert_eq!(
///     store.lookup("hello", &langid!("zh-CN"), &[&"Ada"]).as_deref(),
///     Some("你好，Ada")
/// );
/// ```
pub struct ResourceMessageSource {
    source: String,
    loader: ResourceLoader,
    default_locale: Locale,
    configured_locales: Option<Vec<Locale>>,
    state: RwLock<Lifecycle>,
    reload_lock: Mutex<()>,
    listeners: RwLock<Vec<ReloadListener>>,
}

impl std::fmt::Debug for ResourceMessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceMessageSource")
            .field("source", &self.source)
            .field("default_locale", &self.default_locale)
            .field("configured_locales", &self.configured_locales)
            .field("state", &*self.state.read())
            .field("listeners", &self.listeners.read().len())
            .finish_non_exhaustive()
    }
}

impl ResourceMessageSource {
    /// Creates an uninitialized store for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>, loader: ResourceLoader, default_locale: Locale) -> Self {
        Self {
            source: source.into(),
            loader,
            default_locale,
            configured_locales: None,
            state: RwLock::new(Lifecycle::Uninitialized),
            reload_lock: Mutex::new(()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Fixes the supported locales instead of discovering them from the
    /// available resources.
    #[must_use]
    pub fn with_supported_locales(mut self, locales: impl IntoIterator<Item = Locale>) -> Self {
        self.configured_locales = Some(locales.into_iter().collect());
        self
    }

    /// Registers `listener` to be called after every successful reload.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&MessagesReloaded) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Whether [`MessageSource::init`] has completed and the store has not
    /// been destroyed since.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(*self.state.read(), Lifecycle::Initialized(_))
    }

    /// Number of messages per supported locale, in locale order.
    ///
    /// Empty before initialization.
    #[must_use]
    pub fn message_counts(&self) -> Vec<(Locale, usize)> {
        let Some(snapshot) = self.snapshot() else {
            return Vec::new();
        };
        snapshot
            .locales
            .iter()
            .map(|locale| {
                let count = snapshot
                    .catalogues
                    .get(locale)
                    .map_or(0, |catalogue| catalogue.messages.len());
                (locale.clone(), count)
            })
            .collect()
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        match &*self.state.read() {
            Lifecycle::Initialized(snapshot) => Some(Arc::clone(snapshot)),
            Lifecycle::Uninitialized | Lifecycle::Destroyed => None,
        }
    }

    fn destroyed(&self) -> MessageSourceError {
        MessageSourceError::Destroyed {
            source_name: self.source.clone(),
        }
    }

    /// Configured or discovered locales, default first and without repeats.
    fn resolve_locales(&self) -> MessageResult<Vec<Locale>> {
        let candidates = match &self.configured_locales {
            Some(locales) => locales.clone(),
            None => self.loader.discover_locales(&self.source)?,
        };
        let mut locales = vec![self.default_locale.clone()];
        for locale in candidates {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        Ok(locales)
    }

    fn load_default(&self) -> MessageResult<Catalogue> {
        let name = self.loader.resource_name(&self.source, &self.default_locale);
        let merged = self
            .loader
            .load_merged(&self.source, &self.default_locale)?
            .ok_or_else(|| MessageSourceError::MissingDefaultResource {
                source_name: self.source.clone(),
                locale: self.default_locale.clone(),
                resource: name.clone(),
            })?;
        Ok(Catalogue {
            name,
            resources: merged.resources,
            messages: Arc::new(merged.messages),
        })
    }

    fn load_overlay(&self, locale: &Locale, base: &Catalogue) -> MessageResult<Catalogue> {
        let name = self.loader.resource_name(&self.source, locale);
        let Some(merged) = self.loader.load_merged(&self.source, locale)? else {
            tracing::debug!(
                source = %self.source,
                locale = %locale,
                "no resource for locale; serving default messages"
            );
            return Ok(Catalogue {
                name,
                resources: Vec::new(),
                messages: Arc::clone(&base.messages),
            });
        };
        let mut messages = (*base.messages).clone();
        messages.extend(merged.messages);
        Ok(Catalogue {
            name,
            resources: merged.resources,
            messages: Arc::new(messages),
        })
    }

    fn build(&self, locales: Vec<Locale>) -> MessageResult<Snapshot> {
        let base = self.load_default()?;
        let mut catalogues = HashMap::with_capacity(locales.len());
        for locale in locales.iter().filter(|locale| **locale != self.default_locale) {
            catalogues.insert(locale.clone(), self.load_overlay(locale, &base)?);
        }
        catalogues.insert(self.default_locale.clone(), base);
        Ok(Snapshot {
            locales,
            catalogues,
        })
    }

    /// Rebuilds `affected` locales on top of `current`.
    ///
    /// A change to the default locale invalidates every overlay, so the whole
    /// snapshot is rebuilt in that case.
    fn rebuild(&self, current: &Snapshot, affected: &[Locale]) -> MessageResult<Snapshot> {
        if affected.contains(&self.default_locale) {
            return self.build(current.locales.clone());
        }
        let base = current
            .catalogues
            .get(&self.default_locale)
            .ok_or_else(|| MessageSourceError::MissingDefaultResource {
                source_name: self.source.clone(),
                locale: self.default_locale.clone(),
                resource: self.loader.resource_name(&self.source, &self.default_locale),
            })?;
        let mut catalogues = current.catalogues.clone();
        for locale in affected {
            catalogues.insert(locale.clone(), self.load_overlay(locale, base)?);
        }
        Ok(Snapshot {
            locales: current.locales.clone(),
            catalogues,
        })
    }

    fn affected_locales(&self, snapshot: &Snapshot, event: &ResourceChangeEvent) -> Vec<Locale> {
        let touched: Vec<Locale> = snapshot
            .locales
            .iter()
            .filter(|locale| {
                snapshot
                    .catalogues
                    .get(*locale)
                    .is_some_and(|catalogue| event.changed().any(|id| catalogue.owns(id)))
            })
            .cloned()
            .collect();
        if touched.contains(&self.default_locale) {
            snapshot.locales.clone()
        } else {
            touched
        }
    }

    fn notify(&self, notice: &MessagesReloaded) {
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener(notice);
        }
    }
}

impl MessageSource for ResourceMessageSource {
    fn lookup(&self, code: &str, locale: &Locale, args: &[MessageArg<'_>]) -> Option<String> {
        let snapshot = self.snapshot()?;
        let text = snapshot.catalogues.get(locale)?.messages.get(code)?;
        Some(format(text, args))
    }

    fn default_locale(&self) -> Locale {
        self.default_locale.clone()
    }

    fn supported_locales(&self) -> Vec<Locale> {
        self.snapshot().map_or_else(
            || vec![self.default_locale.clone()],
            |snapshot| snapshot.locales.clone(),
        )
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn init(&self) -> MessageResult<()> {
        let _serialized = self.reload_lock.lock();
        match &*self.state.read() {
            Lifecycle::Initialized(_) => return Ok(()),
            Lifecycle::Destroyed => return Err(self.destroyed()),
            Lifecycle::Uninitialized => {}
        }
        let locales = self.resolve_locales()?;
        let snapshot = self.build(locales)?;
        tracing::info!(
            source = %self.source,
            default_locale = %self.default_locale,
            locales = snapshot.locales.len(),
            "message source initialized"
        );
        *self.state.write() = Lifecycle::Initialized(Arc::new(snapshot));
        Ok(())
    }

    fn destroy(&self) {
        let _serialized = self.reload_lock.lock();
        *self.state.write() = Lifecycle::Destroyed;
        self.listeners.write().clear();
        tracing::debug!(source = %self.source, "message source destroyed");
    }

    fn reload(&self, event: &ResourceChangeEvent) -> MessageResult<ReloadOutcome> {
        let serialized = self.reload_lock.lock();
        let current = match &*self.state.read() {
            Lifecycle::Initialized(snapshot) => Arc::clone(snapshot),
            Lifecycle::Uninitialized => return Ok(ReloadOutcome::unaffected()),
            Lifecycle::Destroyed => return Err(self.destroyed()),
        };
        let affected = self.affected_locales(&current, event);
        if affected.is_empty() {
            return Ok(ReloadOutcome::unaffected());
        }
        let next = self.rebuild(&current, &affected).inspect_err(|err| {
            tracing::warn!(
                source = %self.source,
                error = %err,
                "reload failed; keeping previous messages"
            );
        })?;
        *self.state.write() = Lifecycle::Initialized(Arc::new(next));
        // Listeners may call back into this store.
        drop(serialized);

        let notice = MessagesReloaded {
            source: self.source.clone(),
            locales: affected,
            resources: event
                .changed()
                .filter(|id| current.owns(id))
                .map(str::to_owned)
                .collect(),
        };
        tracing::info!(
            source = %notice.source,
            locales = notice.locales.len(),
            resources = ?notice.resources,
            "messages reloaded"
        );
        self.notify(&notice);
        Ok(ReloadOutcome::reloaded(notice))
    }

    fn owns_resource(&self, identifier: &str) -> bool {
        self.snapshot()
            .is_some_and(|snapshot| snapshot.owns(identifier))
    }
}
