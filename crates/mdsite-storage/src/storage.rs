//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing, reading and writing
//! directory trees, along with [`StorageError`] for unified error handling
//! across backends.
//!
//! # Path Convention
//!
//! All path parameters are plain paths as the caller built them (usually by
//! joining an entry name onto a directory path). Backends do not resolve or
//! canonicalize them; the same path always addresses the same entry.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Kind of a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (symlinks are followed).
    File,
    /// Directory (symlinks are followed).
    Dir,
}

/// A direct child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Entry name, without any directory component.
    pub name: OsString,
    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
}

impl Entry {
    /// Create a file entry.
    #[must_use]
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Resource already exists.
    AlreadyExists,
    /// Invalid path (e.g. not UTF-8, wrong entry type).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::AlreadyExists => "Already exists",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Directory tree abstraction used by the build pipeline.
///
/// Implementations must be safe to share across threads: pages may be
/// rendered concurrently, each writing its own file and creating (possibly
/// the same) parent directories.
pub trait Storage: Send + Sync {
    /// List the direct children of `dir`, sorted by name.
    ///
    /// Entries that are neither files nor directories are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `dir` doesn't exist or can't be read.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError>;

    /// Check if anything exists at `path`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is a directory.
    ///
    /// Returns `false` on errors.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist, can't be read,
    /// or isn't valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError>;

    /// Create or truncate `path` and write `contents` to it.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file can't be written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError>;

    /// Create `path` and all missing ancestors.
    ///
    /// Succeeds if the directory already exists, including when another
    /// thread created it concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a directory can't be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError>;

    /// Remove the directory at `path` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `path` doesn't exist or can't be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<(), StorageError>;

    /// Copy a file byte-for-byte, preserving modification time, access
    /// time and permission bits.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source can't be read or the
    /// destination can't be written.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), StorageError>;

    /// Absolute form of `path` used to decide whether two paths overlap.
    ///
    /// `.` and `..` are folded away. The default is purely lexical, relative
    /// to the working directory; backends with symbolic links follow them.
    fn resolve(&self, path: &Path) -> PathBuf {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        join_normalized(PathBuf::new(), &absolute)
    }
}

/// Append `rest` to `base`, folding `.` and `..` lexically.
pub(crate) fn join_normalized(mut base: PathBuf, rest: &Path) -> PathBuf {
    for component in rest.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other),
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_entry_constructors() {
        let file = Entry::file("index.md");
        let dir = Entry::dir("blog");

        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(dir.kind, EntryKind::Dir);
        assert_eq!(dir.name, OsString::from("blog"));
    }

    #[test]
    fn test_storage_error_display_full() {
        let err = StorageError::new(StorageErrorKind::PermissionDenied)
            .with_backend("Fs")
            .with_path("docs/index.html");

        assert_eq!(
            err.to_string(),
            "[Fs] Permission denied (path: docs/index.html)"
        );
    }

    #[test]
    fn test_storage_error_display_with_source() {
        let err = StorageError::new(StorageErrorKind::Other)
            .with_source(io::Error::other("disk full"))
            .with_path("docs/a.html");

        assert_eq!(err.to_string(), "Error: disk full (path: docs/a.html)");
    }

    #[test]
    fn test_io_error_kind_mapping() {
        let cases = [
            (io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (
                io::ErrorKind::PermissionDenied,
                StorageErrorKind::PermissionDenied,
            ),
            (io::ErrorKind::AlreadyExists, StorageErrorKind::AlreadyExists),
            (io::ErrorKind::Interrupted, StorageErrorKind::Other),
        ];

        for (io_kind, expected) in cases {
            let err = StorageError::io(io::Error::from(io_kind), "x");
            assert_eq!(err.kind, expected);
        }
    }

    #[test]
    fn test_join_normalized() {
        assert_eq!(
            join_normalized(PathBuf::new(), Path::new("/site/build/../content/./blog")),
            PathBuf::from("/site/content/blog")
        );
        assert_eq!(
            join_normalized(PathBuf::from("/real/root"), Path::new("a/../../b")),
            PathBuf::from("/real/b")
        );
        assert_eq!(
            join_normalized(PathBuf::from("/"), Path::new("../..")),
            PathBuf::from("/")
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = StorageError::io(io::Error::other("boom"), "x");
        assert!(err.source().is_some());

        let bare = StorageError::new(StorageErrorKind::Other);
        assert!(bare.source().is_none());
    }
}
