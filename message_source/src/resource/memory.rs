//! In-memory resources for embedded catalogues and tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use parking_lot::RwLock;

use super::{ResourceEnumerator, ResourceId};

const DEFAULT_ORIGIN: &str = "memory";

/// Resources held in memory, keyed by logical name.
///
/// Each logical name may hold several copies under different origins, kept
/// in insertion order. [`MemoryEnumerator::insert`] replaces the text of an
/// existing copy in place, which lets callers simulate an edited resource
/// before publishing a change event.
///
/// # Examples
///
/// ```rust
/// use message_source::resource::{MemoryEnumerator, ResourceEnumerator};
///
/// let resources = MemoryEnumerator::new()
///     .with("i18n/user/i18n_messages_en.properties", "greeting=Hello");
/// let found = resources
///     .resources("i18n/user/i18n_messages_en.properties")
///     .expect("memory never fails");
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnumerator {
    entries: RwLock<BTreeMap<String, Vec<(String, Vec<u8>)>>>,
}

impl MemoryEnumerator {
    /// Creates an empty enumerator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `text` under the default origin and returns `self`.
    #[must_use]
    pub fn with(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(DEFAULT_ORIGIN, name, text);
        self
    }

    /// Adds `text` under `origin` and returns `self`.
    #[must_use]
    pub fn with_origin(
        self,
        origin: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(origin, name, text);
        self
    }

    /// Inserts or replaces the copy of `name` held under `origin`.
    ///
    /// Returns the identifier of the stored resource.
    pub fn insert(
        &self,
        origin: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> ResourceId {
        let origin_text = origin.into();
        let name_text = name.into();
        let bytes = text.into().into_bytes();
        let mut entries = self.entries.write();
        let copies = entries.entry(name_text.clone()).or_default();
        match copies.iter_mut().find(|(existing, _)| *existing == origin_text) {
            Some((_, stored)) => *stored = bytes,
            None => copies.push((origin_text.clone(), bytes)),
        }
        ResourceId::new(origin_text, name_text)
    }

    /// Removes the copy identified by `id`, returning whether it existed.
    pub fn remove(&self, id: &ResourceId) -> bool {
        let mut entries = self.entries.write();
        let Some(copies) = entries.get_mut(id.name()) else {
            return false;
        };
        let before = copies.len();
        copies.retain(|(origin, _)| origin != id.origin());
        let removed = copies.len() != before;
        if copies.is_empty() {
            entries.remove(id.name());
        }
        removed
    }
}

impl ResourceEnumerator for MemoryEnumerator {
    fn resources(&self, name: &str) -> io::Result<Vec<ResourceId>> {
        Ok(self
            .entries
            .read()
            .get(name)
            .map(|copies| {
                copies
                    .iter()
                    .map(|(origin, _)| ResourceId::new(origin.as_str(), name))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn read(&self, id: &ResourceId) -> io::Result<Vec<u8>> {
        self.entries
            .read()
            .get(id.name())
            .and_then(|copies| copies.iter().find(|(origin, _)| origin == id.origin()))
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no resource {id}")))
    }

    fn list(&self, directory: &str) -> io::Result<Vec<String>> {
        let prefix = if directory.is_empty() {
            String::new()
        } else {
            format!("{}/", directory.trim_end_matches('/'))
        };
        let names: BTreeSet<String> = self
            .entries
            .read()
            .keys()
            .filter_map(|name| name.strip_prefix(prefix.as_str()))
            .filter(|file| !file.is_empty() && !file.contains('/'))
            .map(str::to_owned)
            .collect();
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EN: &str = "i18n/user/i18n_messages_en.properties";

    #[rstest]
    fn keeps_copies_in_insertion_order() {
        let resources = MemoryEnumerator::new()
            .with_origin("a", EN, "x=1")
            .with_origin("b", EN, "x=2");
        let found = resources.resources(EN).expect("memory never fails");
        let origins: Vec<&str> = found.iter().map(ResourceId::origin).collect();
        assert_eq!(origins, vec!["a", "b"]);
    }

    #[rstest]
    fn insert_replaces_existing_copy() {
        let resources = MemoryEnumerator::new().with(EN, "x=1");
        let id = resources.insert("memory", EN, "x=2");
        assert_eq!(resources.resources(EN).expect("list").len(), 1);
        assert_eq!(resources.read(&id).expect("read"), b"x=2".to_vec());
    }

    #[rstest]
    fn remove_drops_copy() {
        let resources = MemoryEnumerator::new().with(EN, "x=1");
        let id = ResourceId::new("memory", EN);
        assert!(resources.remove(&id));
        assert!(!resources.remove(&id));
        assert!(resources.resources(EN).expect("list").is_empty());
        assert_eq!(
            resources.read(&id).expect_err("removed").kind(),
            io::ErrorKind::NotFound
        );
    }

    #[rstest]
    fn lists_direct_children_only() {
        let resources = MemoryEnumerator::new()
            .with(EN, "x=1")
            .with("i18n/user/nested/i18n_messages_fr.properties", "x=2")
            .with("i18n/order/i18n_messages_en.properties", "x=3");
        assert_eq!(
            resources.list("i18n/user").expect("list"),
            vec![String::from("i18n_messages_en.properties")]
        );
    }
}
