//! Build orchestration: reset, mirror static assets, render content.

use std::path::{Path, PathBuf};

use mdsite_renderer::Template;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::mirror::{is_within, mirror};
use crate::walker::ContentWalker;

/// Input locations for a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPaths {
    /// Markdown content tree.
    pub content_dir: PathBuf,
    /// HTML template file.
    pub template: PathBuf,
    /// Static assets tree, copied verbatim if it exists.
    pub static_dir: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Summary of a finished build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages rendered from markdown.
    pub pages: usize,
    /// Static files copied.
    pub assets: usize,
}

/// Builds a static site from a content tree, a template and static assets.
///
/// Every build starts from scratch: the output directory is deleted and
/// recreated before anything is written, so no file from an earlier build
/// survives.
pub struct SiteBuilder {
    ctx: BuildContext,
    paths: BuildPaths,
    parallel: bool,
}

impl SiteBuilder {
    /// Create a new builder. Output goes to `ctx.output_root`.
    #[must_use]
    pub fn new(ctx: BuildContext, paths: BuildPaths) -> Self {
        Self {
            ctx,
            paths,
            parallel: false,
        }
    }

    /// Render pages in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the build.
    ///
    /// 1. Delete and recreate the output directory.
    /// 2. Mirror the static directory into it, if the static directory exists.
    /// 3. Load the template.
    /// 4. Render every markdown file of the content tree into it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsafeOutput`] before touching anything if the
    /// output directory overlaps an input. Otherwise the first storage or
    /// template failure aborts the build, leaving the output incomplete.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let storage = self.ctx.storage.as_ref();
        let output_dir = self.ctx.output_root.as_path();

        self.check_output_is_safe()?;

        if storage.exists(output_dir) {
            tracing::info!(path = %output_dir.display(), "Removing previous output");
            storage.remove_dir_all(output_dir)?;
        }
        storage.create_dir_all(output_dir)?;

        let assets = if storage.exists(&self.paths.static_dir) {
            mirror(storage, &self.paths.static_dir, output_dir)?
        } else {
            tracing::debug!(
                path = %self.paths.static_dir.display(),
                "No static directory, skipping asset copy"
            );
            0
        };

        let template = self.load_template()?;

        let pages = ContentWalker::new(&self.ctx)
            .with_parallel(self.parallel)
            .walk_and_render(&self.paths.content_dir, &template, output_dir)?;

        tracing::info!(pages, assets, output = %output_dir.display(), "Build complete");
        Ok(BuildReport { pages, assets })
    }

    fn load_template(&self) -> Result<Template, BuildError> {
        let path = &self.paths.template;
        self.ctx
            .storage
            .read_to_string(path)
            .map(Template::new)
            .map_err(|source| BuildError::Template {
                path: path.clone(),
                source,
            })
    }

    /// Refuse outputs whose reset would delete an input, or that sit inside
    /// an input tree (the walk or the mirror would then feed on its own output).
    fn check_output_is_safe(&self) -> Result<(), BuildError> {
        let storage = self.ctx.storage.as_ref();
        let output = &self.ctx.output_root;
        let unsafe_output = |input: &Path| BuildError::UnsafeOutput {
            output: output.clone(),
            input: input.to_path_buf(),
        };
        let overlaps = |input: &Path| {
            is_within(storage, input, output) || is_within(storage, output, input)
        };

        let content = &self.paths.content_dir;
        if overlaps(content) {
            return Err(unsafe_output(content));
        }
        if is_within(storage, &self.paths.template, output) {
            return Err(unsafe_output(&self.paths.template));
        }
        let static_dir = &self.paths.static_dir;
        if storage.exists(static_dir) && overlaps(static_dir) {
            return Err(unsafe_output(static_dir));
        }
        Ok(())
    }
}
