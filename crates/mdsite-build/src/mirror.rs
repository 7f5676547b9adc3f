//! Tree mirror: replace a destination tree with a copy of a source tree.

use std::path::{Path, PathBuf};

use mdsite_storage::{EntryKind, Storage};

use crate::error::BuildError;

/// Mirror `source_dir` onto `dest_dir`.
///
/// An existing `dest_dir` is deleted first; nothing from it survives. Files
/// are copied byte-for-byte with their timestamps and permission bits, and
/// subdirectories are mirrored the same way. Returns the number of files
/// copied.
///
/// Any storage error aborts the mirror. Whatever was copied up to that point
/// stays in place.
///
/// # Errors
///
/// Returns [`BuildError::UnsafeOutput`] if `dest_dir` lies inside
/// `source_dir` (the copy would feed on itself), or [`BuildError::Storage`]
/// on any filesystem failure.
pub fn mirror(storage: &dyn Storage, source_dir: &Path, dest_dir: &Path) -> Result<usize, BuildError> {
    if is_within(storage, dest_dir, source_dir) {
        return Err(BuildError::UnsafeOutput {
            output: dest_dir.to_path_buf(),
            input: source_dir.to_path_buf(),
        });
    }

    if storage.exists(dest_dir) {
        tracing::info!(path = %dest_dir.display(), "Deleting existing destination directory");
        storage.remove_dir_all(dest_dir)?;
    }

    let mut copied = 0;
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(source_dir.to_path_buf(), dest_dir.to_path_buf())];

    while let Some((src_dir, dst_dir)) = pending.pop() {
        tracing::info!(path = %dst_dir.display(), "Creating destination directory");
        storage.create_dir_all(&dst_dir)?;

        for entry in storage.list(&src_dir)? {
            let src = src_dir.join(&entry.name);
            let dst = dst_dir.join(&entry.name);
            match entry.kind {
                EntryKind::File => {
                    tracing::info!(from = %src.display(), to = %dst.display(), "Copying file");
                    storage.copy_file(&src, &dst)?;
                    copied += 1;
                }
                EntryKind::Dir => pending.push((src, dst)),
            }
        }
    }

    Ok(copied)
}

/// True if `path` equals `root` or lies below it.
///
/// Both sides go through [`Storage::resolve`] first, so `docs`, `./docs`,
/// `build/../docs` and a link pointing at `docs` all compare equal.
pub(crate) fn is_within(storage: &dyn Storage, path: &Path, root: &Path) -> bool {
    storage.resolve(path).starts_with(storage.resolve(root))
}
