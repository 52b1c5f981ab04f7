//! Resource discovery and loading.
//!
//! A [`ResourceEnumerator`] is the injected capability that finds every
//! resource with a given logical name (`i18n/user/i18n_messages_en.properties`)
//! across all of its origins, in discovery order. [`ResourceLoader`] turns
//! those resources into merged `code → text` maps for one source and locale.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

mod directory;
mod loader;
mod memory;
mod pattern;

pub use directory::DirectoryEnumerator;
pub use loader::{LoadedResource, MergedResources, ResourceLoader};
pub use memory::MemoryEnumerator;
pub use pattern::{DEFAULT_RESOURCE_PATTERN, ResourcePattern};

/// Separates the origin from the logical name in a rendered [`ResourceId`].
const ORIGIN_SEPARATOR: &str = "!/";

/// Identifies one concrete resource: a logical name found under an origin.
///
/// Renders as `<origin>!/<name>`, the form carried by change events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    origin: String,
    name: String,
}

impl ResourceId {
    /// Creates an identifier for `name` discovered under `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            name: name.into(),
        }
    }

    /// Origin (root directory, archive, or in-memory bucket) of the resource.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Logical name shared by every copy of the resource.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a change-event identifier refers to this resource.
    ///
    /// Both the rendered form and the bare logical name match.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        logical_name(identifier) == self.name
            && identifier
                .split_once(ORIGIN_SEPARATOR)
                .is_none_or(|(origin, _)| origin == self.origin)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ORIGIN_SEPARATOR}{}", self.origin, self.name)
    }
}

/// Returns the logical name part of a change-event identifier.
#[must_use]
pub fn logical_name(identifier: &str) -> &str {
    identifier
        .split_once(ORIGIN_SEPARATOR)
        .map_or(identifier, |(_, name)| name)
}

/// Capability that discovers and reads resources by logical name.
///
/// Implementations must return every match, not just the first, so catalogues
/// split across several roots can be merged.
pub trait ResourceEnumerator: Send + Sync + fmt::Debug {
    /// Lists every resource named `name`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an origin cannot be inspected. A missing
    /// resource is not an error.
    fn resources(&self, name: &str) -> io::Result<Vec<ResourceId>>;

    /// Reads one resource fully.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the resource vanished or cannot be read.
    fn read(&self, id: &ResourceId) -> io::Result<Vec<u8>>;

    /// Lists the file names directly under the logical `directory`, merged
    /// across origins and sorted.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when an existing directory cannot be listed.
    fn list(&self, directory: &str) -> io::Result<Vec<String>>;
}

/// Text encoding of resource files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8 (the default).
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1, the historical encoding of properties files.
    #[serde(rename = "iso-8859-1", alias = "latin1", alias = "ISO-8859-1")]
    Latin1,
}

impl Encoding {
    /// Decodes raw resource bytes.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidData`] when UTF-8 input is malformed.
    pub fn decode(self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn renders_origin_and_name() {
        let id = ResourceId::new("/srv/a", "i18n/user/i18n_messages_en.properties");
        assert_eq!(
            id.to_string(),
            "/srv/a!/i18n/user/i18n_messages_en.properties"
        );
    }

    #[rstest]
    #[case("/srv/a!/i18n/user/en.properties", true)]
    #[case("i18n/user/en.properties", true)]
    #[case("/srv/b!/i18n/user/en.properties", false)]
    #[case("i18n/user/fr.properties", false)]
    fn matches_rendered_and_logical_forms(#[case] identifier: &str, #[case] expected: bool) {
        let id = ResourceId::new("/srv/a", "i18n/user/en.properties");
        assert_eq!(id.matches(identifier), expected);
    }

    #[rstest]
    fn decodes_latin1_bytes() {
        let text = Encoding::Latin1
            .decode(vec![b'a', b'=', 0xe9])
            .expect("latin1 never fails");
        assert_eq!(text, "a=é");
    }

    #[rstest]
    fn rejects_invalid_utf8() {
        let err = Encoding::Utf8
            .decode(vec![0xff, 0xfe])
            .expect_err("invalid UTF-8 should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
