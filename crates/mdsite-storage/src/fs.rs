//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for walking and writing directory trees on the
//! local filesystem.

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use crate::storage::{Entry, Storage, StorageError, join_normalized};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Stateless: every call goes straight to `std::fs`. Symlinks are followed
/// when classifying entries, so a link to a directory is walked like a
/// directory and a link to a file is copied like a file.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |e| StorageError::io(e, path).with_backend(BACKEND)
}

impl Storage for FsStorage {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let entry = entry.map_err(io_err(dir))?;
            let path = entry.path();

            // fs::metadata follows symlinks; dangling links are skipped
            let Ok(meta) = fs::metadata(&path) else {
                tracing::debug!(path = %path.display(), "Skipping unreadable entry");
                continue;
            };
            if meta.is_dir() {
                entries.push(Entry::dir(entry.file_name()));
            } else if meta.is_file() {
                entries.push(Entry::file(entry.file_name()));
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(io_err(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        fs::write(path, contents).map_err(io_err(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        // create_dir_all tolerates directories created concurrently by other threads
        fs::create_dir_all(path).map_err(io_err(path))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_dir_all(path).map_err(io_err(path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        let meta = fs::metadata(from).map_err(io_err(from))?;

        // fs::copy carries permission bits over
        fs::copy(from, to).map_err(io_err(to))?;

        let mut times = FileTimes::new();
        if let Ok(modified) = meta.modified() {
            times = times.set_modified(modified);
        }
        if let Ok(accessed) = meta.accessed() {
            times = times.set_accessed(accessed);
        }

        // The owner may set timestamps through a read-only handle, which keeps
        // this working when the copied permissions forbid writing.
        File::open(to)
            .and_then(|file| file.set_times(times))
            .map_err(io_err(to))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        // Canonicalize the longest existing prefix; the rest can't hold links
        for ancestor in absolute.ancestors() {
            if let Ok(base) = fs::canonicalize(ancestor)
                && let Ok(rest) = absolute.strip_prefix(ancestor)
            {
                return join_normalized(base, rest);
            }
        }
        join_normalized(PathBuf::new(), &absolute)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::storage::StorageErrorKind;

    #[test]
    fn test_list_sorted_and_classified() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("blog")).unwrap();
        fs::write(tmp.path().join("index.md"), "# Home").unwrap();
        fs::write(tmp.path().join("about.md"), "# About").unwrap();

        let entries = FsStorage::new().list(tmp.path()).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::file("about.md"),
                Entry::dir("blog"),
                Entry::file("index.md"),
            ]
        );
    }

    #[test]
    fn test_list_missing_dir() {
        let tmp = TempDir::new().unwrap();

        let err = FsStorage::new().list(&tmp.path().join("nope")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path, Some(tmp.path().join("nope")));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_dangling_symlink() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real.md"), "x").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("link.md")).unwrap();

        let entries = FsStorage::new().list(tmp.path()).unwrap();

        assert_eq!(entries, vec![Entry::file("real.md")]);
    }

    #[test]
    fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let path = tmp.path().join("page.html");

        storage.write(&path, "<p>one</p>").unwrap();
        storage.write(&path, "<p>two</p>").unwrap();

        assert_eq!(storage.read_to_string(&path).unwrap(), "<p>two</p>");
    }

    #[test]
    fn test_write_requires_parent() {
        let tmp = TempDir::new().unwrap();

        let err = FsStorage::new()
            .write(&tmp.path().join("missing/page.html"), "x")
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_create_dir_all_idempotent() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let dir = tmp.path().join("a/b/c");

        storage.create_dir_all(&dir).unwrap();
        storage.create_dir_all(&dir).unwrap();

        assert!(storage.is_dir(&dir));
    }

    #[test]
    fn test_remove_dir_all() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let dir = tmp.path().join("out");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/stale.html"), "old").unwrap();

        storage.remove_dir_all(&dir).unwrap();

        assert!(!storage.exists(&dir));
    }

    #[test]
    fn test_copy_file_preserves_content_and_mtime() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("logo.png");
        let dst = tmp.path().join("copy.png");
        let bytes: Vec<u8> = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];
        fs::write(&src, &bytes).unwrap();

        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(old)
            .unwrap();

        FsStorage::new().copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), bytes);
        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), old);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_file_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("run.sh");
        let dst = tmp.path().join("copy.sh");
        fs::write(&src, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o754)).unwrap();

        FsStorage::new().copy_file(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o754);
    }

    #[test]
    fn test_copy_file_missing_source() {
        let tmp = TempDir::new().unwrap();

        let err = FsStorage::new()
            .copy_file(&tmp.path().join("nope"), &tmp.path().join("dst"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path, Some(tmp.path().join("nope")));
    }

    #[test]
    fn test_resolve_folds_parent_components() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        fs::create_dir_all(root.join("build")).unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        let storage = FsStorage::new();

        assert_eq!(
            storage.resolve(&tmp.path().join("build/../content")),
            root.join("content")
        );
        assert_eq!(
            storage.resolve(&tmp.path().join("missing/../content/new/./page")),
            root.join("content/new/page")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_follows_symlinks() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        std::os::unix::fs::symlink(root.join("content"), root.join("site")).unwrap();
        let storage = FsStorage::new();

        assert_eq!(storage.resolve(&tmp.path().join("site")), root.join("content"));
        assert_eq!(
            storage.resolve(&tmp.path().join("site/out")),
            root.join("content/out")
        );
    }
}
