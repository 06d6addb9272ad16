//! Read-only sources of template fragment text.
//! Fragments are addressed by forward-slash paths such as
//! `templates/license/mit.tmpl`, whichever backend holds them.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use include_dir::{include_dir, Dir};
use log::debug;

use crate::error::{Error, Result};

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

/// Trait for reading template fragments from different sources.
pub trait TemplateStore {
    /// Reads the fragment stored at `path`.
    ///
    /// # Arguments
    /// * `path` - Store path of the fragment (root prefix included)
    ///
    /// # Returns
    /// * `Result<String>` - Fragment text
    ///
    /// # Errors
    /// * `Error::TemplateLoadError` if the path does not resolve or is not UTF-8
    fn read(&self, path: &str) -> Result<String>;
}

/// Fragments compiled into the binary from `src/assets`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    pub fn new() -> Self {
        Self
    }

    /// Lists every embedded fragment path, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&ASSETS, &mut paths);
        paths.sort();
        paths
    }
}

fn collect_paths(dir: &'static Dir, paths: &mut Vec<String>) {
    for file in dir.files() {
        paths.push(file.path().to_string_lossy().replace('\\', "/"));
    }
    for subdir in dir.dirs() {
        collect_paths(subdir, paths);
    }
}

impl TemplateStore for EmbeddedStore {
    fn read(&self, path: &str) -> Result<String> {
        let file = ASSETS.get_file(path).ok_or_else(|| Error::TemplateLoadError {
            fragment: path.to_string(),
            reason: "not found in embedded templates".to_string(),
        })?;
        file.contents_utf8().map(str::to_owned).ok_or_else(|| Error::TemplateLoadError {
            fragment: path.to_string(),
            reason: "fragment is not valid UTF-8".to_string(),
        })
    }
}

/// Fragments read from a directory on the local filesystem.
///
/// The directory plays the role of `src/assets`: fragments live under its
/// `templates/` subdirectory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`.
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if `root` is not an existing directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: root.display().to_string(),
            });
        }
        debug!("Using templates from '{}'.", root.display());
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryStore {
    fn read(&self, path: &str) -> Result<String> {
        let relative = Path::new(path);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(Error::TemplateLoadError {
                fragment: path.to_string(),
                reason: "fragment path must stay inside the template directory".to_string(),
            });
        }

        let full_path = self.root.join(relative);
        fs::read_to_string(&full_path).map_err(|e| Error::TemplateLoadError {
            fragment: path.to_string(),
            reason: format!("{} ({})", e, full_path.display()),
        })
    }
}

/// In-memory fragments, keyed by store path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    fragments: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<String>, S: Into<String>>(&mut self, path: P, source: S) {
        self.fragments.insert(path.into(), source.into());
    }

    /// Builder-style variant of [`MemoryStore::insert`].
    pub fn with<P: Into<String>, S: Into<String>>(mut self, path: P, source: S) -> Self {
        self.insert(path, source);
        self
    }
}

impl<P: Into<String>, S: Into<String>> FromIterator<(P, S)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (P, S)>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for (path, source) in iter {
            store.insert(path, source);
        }
        store
    }
}

impl TemplateStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String> {
        self.fragments.get(path).cloned().ok_or_else(|| Error::TemplateLoadError {
            fragment: path.to_string(),
            reason: "not found in memory store".to_string(),
        })
    }
}

impl fmt::Display for DirectoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local path: '{}'", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_store_reads_templates() {
        let store = EmbeddedStore::new();
        let mit = store.read("templates/license/mit.tmpl").unwrap();
        assert!(mit.contains("MIT License"));

        assert!(store.paths().iter().any(|p| p == "templates/internal/commands/base.go.tmpl"));
    }

    #[test]
    fn test_embedded_store_missing_fragment() {
        match EmbeddedStore::new().read("templates/nope.tmpl") {
            Err(Error::TemplateLoadError { fragment, .. }) => {
                assert_eq!(fragment, "templates/nope.tmpl")
            }
            other => panic!("Expected TemplateLoadError, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_store_rejects_escaping_paths() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = DirectoryStore::new(temp_dir.path()).unwrap();

        assert!(matches!(
            store.read("templates/../../etc/passwd"),
            Err(Error::TemplateLoadError { .. })
        ));
        assert!(matches!(store.read("/etc/passwd"), Err(Error::TemplateLoadError { .. })));
    }

    #[test]
    fn test_directory_store_reads_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let fragment_dir = temp_dir.path().join("templates/common");
        fs::create_dir_all(&fragment_dir).unwrap();
        fs::write(fragment_dir.join("readme.md.tmpl"), "# {{ project_name }}\n").unwrap();

        let store = DirectoryStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.read("templates/common/readme.md.tmpl").unwrap(), "# {{ project_name }}\n");
        assert!(store.read("templates/common/missing.tmpl").is_err());
    }

    #[test]
    fn test_directory_store_requires_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        assert!(matches!(
            DirectoryStore::new(&missing),
            Err(Error::TemplateDoesNotExistsError { .. })
        ));
    }
}
