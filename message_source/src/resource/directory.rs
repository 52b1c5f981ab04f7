//! Filesystem-backed resource enumeration across several root directories.

use std::collections::BTreeSet;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::{ResourceEnumerator, ResourceId};

/// Finds resources under an ordered list of root directories.
///
/// Roots are searched in the order given, so a resource present under the
/// second root overrides keys from the first when the loader merges them.
/// Missing roots are skipped. Paths are resolved through `cap-std`, so a
/// logical name can never escape its root.
///
/// # Examples
///
/// ```rust,no_run
/// use message_source::resource::{DirectoryEnumerator, ResourceEnumerator};
///
/// let enumerator = DirectoryEnumerator::new(["/opt/app/resources", "./resources"]);
/// let found = enumerator
///     .resources("i18n/user/i18n_messages_en.properties")
///     .expect("roots should be readable");
/// for id in found {
///     println!("{id}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryEnumerator {
    roots: Vec<Utf8PathBuf>,
}

impl DirectoryEnumerator {
    /// Creates an enumerator over `roots`, searched in order.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Root directories in search order.
    #[must_use]
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    fn open_root(root: &Utf8Path) -> io::Result<Option<Dir>> {
        match Dir::open_ambient_dir(root, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(root = %root, "skipping missing resource root");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn open_origin(&self, origin: &str) -> io::Result<Dir> {
        let root = self
            .roots
            .iter()
            .find(|root| root.as_str() == origin)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unknown resource root '{origin}'"),
                )
            })?;
        Self::open_root(root)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("resource root '{root}' no longer exists"),
            )
        })
    }
}

impl ResourceEnumerator for DirectoryEnumerator {
    fn resources(&self, name: &str) -> io::Result<Vec<ResourceId>> {
        let mut found = Vec::new();
        for root in &self.roots {
            let Some(dir) = Self::open_root(root)? else {
                continue;
            };
            if dir.is_file(name) {
                found.push(ResourceId::new(root.as_str(), name));
            }
        }
        Ok(found)
    }

    fn read(&self, id: &ResourceId) -> io::Result<Vec<u8>> {
        self.open_origin(id.origin())?.read(id.name())
    }

    fn list(&self, directory: &str) -> io::Result<Vec<String>> {
        let target = if directory.is_empty() { "." } else { directory };
        let mut names = BTreeSet::new();
        for root in &self.roots {
            let Some(dir) = Self::open_root(root)? else {
                continue;
            };
            let entries = match dir.read_dir(target) {
                Ok(entries) => entries,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err),
            };
            for entry_result in entries {
                let entry = entry_result?;
                if entry.file_type()?.is_file() {
                    names.insert(entry.file_name()?);
                }
            }
        }
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Roots {
        _first: TempDir,
        _second: TempDir,
        enumerator: DirectoryEnumerator,
    }

    fn write(root: &TempDir, name: &str, text: &str) {
        let path = root.path().join(name);
        let parent = path.parent().expect("resource paths have parents");
        std::fs::create_dir_all(parent).expect("create resource directory");
        std::fs::write(path, text).expect("write resource");
    }

    fn utf8(root: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(root.path().to_path_buf()).expect("temp dirs are UTF-8")
    }

    #[fixture]
    fn roots() -> Roots {
        let first = TempDir::new().expect("create first root");
        let second = TempDir::new().expect("create second root");
        write(&first, "i18n/user/i18n_messages_en.properties", "a=first");
        write(&second, "i18n/user/i18n_messages_en.properties", "a=second");
        write(&second, "i18n/user/i18n_messages_fr.properties", "a=fr");
        let enumerator = DirectoryEnumerator::new([
            utf8(&first),
            Utf8PathBuf::from("/definitely/missing/root"),
            utf8(&second),
        ]);
        Roots {
            _first: first,
            _second: second,
            enumerator,
        }
    }

    #[rstest]
    fn finds_every_copy_in_root_order(roots: Roots) {
        let found = roots
            .enumerator
            .resources("i18n/user/i18n_messages_en.properties")
            .expect("enumerate resources");
        assert_eq!(found.len(), 2);
        let texts: Vec<Vec<u8>> = found
            .iter()
            .map(|id| roots.enumerator.read(id).expect("read resource"))
            .collect();
        assert_eq!(texts, vec![b"a=first".to_vec(), b"a=second".to_vec()]);
    }

    #[rstest]
    fn missing_resources_are_empty(roots: Roots) {
        let found = roots
            .enumerator
            .resources("i18n/user/i18n_messages_de.properties")
            .expect("enumerate resources");
        assert!(found.is_empty());
    }

    #[rstest]
    fn lists_files_across_roots(roots: Roots) {
        let names = roots.enumerator.list("i18n/user").expect("list directory");
        assert_eq!(
            names,
            vec![
                String::from("i18n_messages_en.properties"),
                String::from("i18n_messages_fr.properties"),
            ]
        );
        assert!(roots.enumerator.list("i18n/absent").expect("list").is_empty());
    }

    #[rstest]
    fn reading_unknown_origin_fails(roots: Roots) {
        let err = roots
            .enumerator
            .read(&ResourceId::new("/elsewhere", "a.properties"))
            .expect_err("unknown origin should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
