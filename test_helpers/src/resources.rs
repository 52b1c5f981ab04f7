//! Temporary on-disk resource trees.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with resource files.
///
/// The directory is removed when the tree is dropped.
///
/// # Examples
///
/// ```
/// use message_source_test_helpers::ResourceTree;
///
/// let tree = ResourceTree::new().expect("create tree");
/// let path = tree
///     .write("i18n/user/i18n_messages_en.properties", "a=1")
///     .expect("write resource");
/// assert!(path.starts_with(tree.root()));
/// ```
#[derive(Debug)]
pub struct ResourceTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ResourceTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary resource root")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root directory of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `text` to the logical resource `name`, creating parent
    /// directories. Existing files are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    pub fn write(&self, name: &str, text: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, text).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Removes the logical resource `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.root.join(name);
        std::fs::remove_file(&path).with_context(|| format!("remove {path}"))
    }

    /// Change-event identifier of the logical resource `name` in this tree.
    #[must_use]
    pub fn identifier(&self, name: &str) -> String {
        format!("{}!/{name}", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn writes_and_removes_nested_resources() {
        let tree = ResourceTree::new().expect("create tree");
        let path = tree
            .write("i18n/user/i18n_messages_en.properties", "a=1")
            .expect("write resource");
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "a=1");
        tree.remove("i18n/user/i18n_messages_en.properties")
            .expect("remove resource");
        assert!(!path.exists());
    }

    #[rstest]
    fn renders_identifiers_with_root() {
        let tree = ResourceTree::new().expect("create tree");
        assert_eq!(
            tree.identifier("a.properties"),
            format!("{}!/a.properties", tree.root())
        );
    }
}
