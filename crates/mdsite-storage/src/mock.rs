//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Metadata carried by an in-memory file and preserved by `copy_file`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// Modification time as seconds since Unix epoch.
    pub modified: u64,
    /// Unix permission bits.
    pub mode: u32,
}

impl Default for FileMeta {
    fn default() -> Self {
        Self {
            modified: 0,
            mode: 0o644,
        }
    }
}

#[derive(Clone, Debug)]
enum Node {
    Dir,
    File { contents: Vec<u8>, meta: FileMeta },
}

/// Mock storage for testing.
///
/// Holds a directory tree in memory. The empty path is the implicit root and
/// always exists. Use the builder methods to seed the tree and the
/// inspection methods to assert on what the pipeline wrote.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use mdsite_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("content/index.md", "# Home\nWelcome")
///     .with_dir("static");
///
/// let entries = storage.list(Path::new("content")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    unreadable: RwLock<HashSet<PathBuf>>,
    unwritable: RwLock<HashSet<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all missing ancestors.
    ///
    /// # Panics
    ///
    /// Panics if a file already occupies one of the ancestors.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.create_dir_all(&path.into()).unwrap();
        self
    }

    /// Add a file with default metadata, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if a file already occupies one of the ancestors.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.with_file_meta(path, contents, FileMeta::default())
    }

    /// Add a file with explicit metadata, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if a file already occupies one of the ancestors.
    #[must_use]
    pub fn with_file_meta(
        self,
        path: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
        meta: FileMeta,
    ) -> Self {
        let path: PathBuf = path.into();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.nodes.write().unwrap().insert(
            path,
            Node::File {
                contents: contents.into(),
                meta,
            },
        );
        self
    }

    /// Make reads (and copies from) `path` fail with permission denied.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.write().unwrap().insert(path.into());
        self
    }

    /// Make writes of files directly inside `dir` fail with permission denied.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unwritable(self, dir: impl Into<PathBuf>) -> Self {
        self.unwritable.write().unwrap().insert(dir.into());
        self
    }

    /// Remove a file or directory tree, as if deleted behind the pipeline's back.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: &Path) {
        self.nodes
            .write()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
    }

    /// File contents as text, or `None` if no file exists at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.read().unwrap().get(path.as_ref()) {
            Some(Node::File { contents, .. }) => Some(String::from_utf8_lossy(contents).into_owned()),
            _ => None,
        }
    }

    /// Metadata of the file at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_meta(&self, path: impl AsRef<Path>) -> Option<FileMeta> {
        match self.nodes.read().unwrap().get(path.as_ref()) {
            Some(Node::File { meta, .. }) => Some(*meta),
            _ => None,
        }
    }

    /// All paths (files and directories) in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.nodes.read().unwrap().keys().cloned().collect()
    }

    /// Files below `root`, keyed by path relative to `root`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn snapshot(&self, root: impl AsRef<Path>) -> BTreeMap<PathBuf, Vec<u8>> {
        let root = root.as_ref();
        self.nodes
            .read()
            .unwrap()
            .iter()
            .filter_map(|(path, node)| match node {
                Node::File { contents, .. } => path
                    .strip_prefix(root)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), contents.clone())),
                Node::Dir => None,
            })
            .collect()
    }

    fn error(kind: StorageErrorKind, path: &Path) -> StorageError {
        StorageError::new(kind).with_path(path).with_backend(BACKEND)
    }

    fn check_readable(&self, path: &Path) -> Result<(), StorageError> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(Self::error(StorageErrorKind::PermissionDenied, path));
        }
        Ok(())
    }

    /// Verify the parent of `path` is an existing, writable directory.
    fn check_parent(&self, nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> Result<(), StorageError> {
        let parent = path.parent().unwrap_or(Path::new(""));
        if self.unwritable.read().unwrap().contains(parent) {
            return Err(Self::error(StorageErrorKind::PermissionDenied, path));
        }
        if parent.as_os_str().is_empty() || matches!(nodes.get(parent), Some(Node::Dir)) {
            Ok(())
        } else {
            Err(Self::error(StorageErrorKind::NotFound, path))
        }
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let nodes = self.nodes.read().unwrap();
        if !dir.as_os_str().is_empty() && !matches!(nodes.get(dir), Some(Node::Dir)) {
            return Err(Self::error(StorageErrorKind::NotFound, dir));
        }

        // BTreeMap iteration keeps the listing sorted by name
        Ok(nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?;
                Some(match node {
                    Node::Dir => Entry::dir(name),
                    Node::File { .. } => Entry::file(name),
                })
            })
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.nodes.read().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || matches!(self.nodes.read().unwrap().get(path), Some(Node::Dir))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        self.check_readable(path)?;
        match self.nodes.read().unwrap().get(path) {
            Some(Node::File { contents, .. }) => String::from_utf8(contents.clone())
                .map_err(|e| Self::error(StorageErrorKind::InvalidPath, path).with_source(e)),
            Some(Node::Dir) => Err(Self::error(StorageErrorKind::InvalidPath, path)),
            None => Err(Self::error(StorageErrorKind::NotFound, path)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let mut nodes = self.nodes.write().unwrap();
        self.check_parent(&nodes, path)?;
        if matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(Self::error(StorageErrorKind::InvalidPath, path));
        }
        nodes.insert(
            path.to_path_buf(),
            Node::File {
                contents: contents.as_bytes().to_vec(),
                meta: FileMeta::default(),
            },
        );
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        let mut nodes = self.nodes.write().unwrap();
        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        ancestors.reverse();

        for dir in ancestors {
            match nodes.get(dir) {
                Some(Node::Dir) => {}
                Some(Node::File { .. }) => {
                    return Err(Self::error(StorageErrorKind::AlreadyExists, dir));
                }
                None => {
                    nodes.insert(dir.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        let mut nodes = self.nodes.write().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => {
                nodes.retain(|p, _| !p.starts_with(path));
                Ok(())
            }
            Some(Node::File { .. }) => Err(Self::error(StorageErrorKind::InvalidPath, path)),
            None => Err(Self::error(StorageErrorKind::NotFound, path)),
        }
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        self.check_readable(from)?;
        let mut nodes = self.nodes.write().unwrap();
        let node = match nodes.get(from) {
            Some(node @ Node::File { .. }) => node.clone(),
            Some(Node::Dir) => return Err(Self::error(StorageErrorKind::InvalidPath, from)),
            None => return Err(Self::error(StorageErrorKind::NotFound, from)),
        };
        self.check_parent(&nodes, to)?;
        nodes.insert(to.to_path_buf(), node);
        Ok(())
    }
}
