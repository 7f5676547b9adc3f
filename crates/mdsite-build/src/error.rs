//! Build error type.

use std::path::PathBuf;

use mdsite_storage::StorageError;

/// Error returned by the build pipeline.
///
/// Every error is fatal: the build stops at the first one and leaves the
/// output directory as it was at that moment.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Filesystem failure while reading, writing, copying or resetting.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template file could not be loaded.
    #[error("Failed to load template {}: {source}", .path.display())]
    Template {
        /// Template path.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },

    /// Output directory overlaps one of the build inputs.
    #[error(
        "Output directory {} overlaps input {}; resetting it would destroy build inputs",
        .output.display(),
        .input.display()
    )]
    UnsafeOutput {
        /// Output (or mirror destination) directory.
        output: PathBuf,
        /// Input path it overlaps.
        input: PathBuf,
    },
}
