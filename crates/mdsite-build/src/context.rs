//! Per-build context shared by every pipeline step.

use std::path::PathBuf;
use std::sync::Arc;

use mdsite_renderer::MarkdownEngine;
use mdsite_storage::Storage;

/// Everything a build step needs besides its own arguments.
///
/// Created once per build and passed down explicitly. Cloning is cheap; all
/// clones share the same storage and engine.
#[derive(Clone)]
pub struct BuildContext {
    /// Backend for every read and write.
    pub storage: Arc<dyn Storage>,
    /// Markdown to HTML conversion.
    pub engine: Arc<dyn MarkdownEngine>,
    /// Prefix substituted for the leading `/` of root-relative URLs.
    pub base_path: String,
    /// Output directory, reset at the start of the build.
    pub output_root: PathBuf,
}

impl BuildContext {
    /// Create a new build context.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        engine: Arc<dyn MarkdownEngine>,
        base_path: impl Into<String>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage,
            engine,
            base_path: base_path.into(),
            output_root: output_root.into(),
        }
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("base_path", &self.base_path)
            .field("output_root", &self.output_root)
            .finish_non_exhaustive()
    }
}
