//! Content walker: find markdown sources and map them to output pages.

use std::path::{Path, PathBuf};

use mdsite_renderer::Template;
use mdsite_storage::EntryKind;
use rayon::prelude::*;

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::page::render_page;

/// Suffix identifying markdown sources.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Suffix of generated pages.
pub const HTML_SUFFIX: &str = ".html";

/// One page to render: a markdown source and its output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageJob {
    /// Markdown source path.
    pub source: PathBuf,
    /// HTML output path.
    pub output: PathBuf,
}

/// Map a markdown path relative to the content root to its page path
/// relative to the output root.
///
/// `a/b/c.md` becomes `a/b/c.html`. Returns `None` for anything without the
/// markdown suffix.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use mdsite_build::destination_for;
///
/// assert_eq!(destination_for(Path::new("a/b/c.md")), Some(PathBuf::from("a/b/c.html")));
/// assert_eq!(destination_for(Path::new("logo.png")), None);
/// ```
pub fn destination_for(relative: &Path) -> Option<PathBuf> {
    let name = relative.file_name()?.to_str()?;
    let stem = name.strip_suffix(MARKDOWN_SUFFIX)?;
    Some(relative.with_file_name(format!("{stem}{HTML_SUFFIX}")))
}

/// Walks a content tree and renders every markdown file in it.
///
/// Files without the markdown suffix are skipped; they belong in the static
/// tree. Every content directory gets a counterpart under the destination,
/// even one holding no markdown.
pub struct ContentWalker<'a> {
    ctx: &'a BuildContext,
    parallel: bool,
}

impl<'a> ContentWalker<'a> {
    /// Create a sequential walker.
    #[must_use]
    pub fn new(ctx: &'a BuildContext) -> Self {
        Self {
            ctx,
            parallel: false,
        }
    }

    /// Render pages on the rayon thread pool instead of one by one.
    ///
    /// Output is identical either way; each page only writes its own file.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Discover pages under `content_dir`, creating the mirrored directory
    /// structure under `dest_dir` as it goes.
    ///
    /// Pre-existing content under `dest_dir` is left alone. Jobs come back
    /// sorted by source path.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Storage`] if a directory can't be listed or created.
    pub fn collect(&self, content_dir: &Path, dest_dir: &Path) -> Result<Vec<PageJob>, BuildError> {
        let storage = self.ctx.storage.as_ref();
        let mut jobs = Vec::new();
        let mut pending: Vec<(PathBuf, PathBuf)> = vec![(content_dir.to_path_buf(), dest_dir.to_path_buf())];

        while let Some((src_dir, dst_dir)) = pending.pop() {
            storage.create_dir_all(&dst_dir)?;

            for entry in storage.list(&src_dir)? {
                let source = src_dir.join(&entry.name);
                match entry.kind {
                    EntryKind::Dir => pending.push((source, dst_dir.join(&entry.name))),
                    EntryKind::File => match destination_for(Path::new(&entry.name)) {
                        Some(page) => jobs.push(PageJob {
                            source,
                            output: dst_dir.join(page),
                        }),
                        None => {
                            tracing::debug!(path = %source.display(), "Skipping non-markdown file");
                        }
                    },
                }
            }
        }

        jobs.sort_by(|a, b| a.source.cmp(&b.source));
        Ok(jobs)
    }

    /// Render every markdown file under `content_dir` into `dest_dir`.
    ///
    /// Returns the number of pages written. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Storage`] on any read, write or listing failure.
    pub fn walk_and_render(
        &self,
        content_dir: &Path,
        template: &Template,
        dest_dir: &Path,
    ) -> Result<usize, BuildError> {
        let jobs = self.collect(content_dir, dest_dir)?;
        tracing::debug!(count = jobs.len(), parallel = self.parallel, "Rendering pages");

        let render = |job: &PageJob| render_page(self.ctx, &job.source, template, &job.output);
        if self.parallel {
            jobs.par_iter().try_for_each(render)?;
        } else {
            jobs.iter().try_for_each(render)?;
        }

        Ok(jobs.len())
    }
}

/// Render every markdown file under `content_dir` into `dest_dir`, sequentially.
///
/// Shorthand for [`ContentWalker::walk_and_render`].
///
/// # Errors
///
/// Returns [`BuildError::Storage`] on any read, write or listing failure.
pub fn walk_and_render(
    ctx: &BuildContext,
    content_dir: &Path,
    template: &Template,
    dest_dir: &Path,
) -> Result<usize, BuildError> {
    ContentWalker::new(ctx).walk_and_render(content_dir, template, dest_dir)
}
