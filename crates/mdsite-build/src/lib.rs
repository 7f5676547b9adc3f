//! Static site build pipeline for mdsite.
//!
//! Turns a content tree of markdown files into a parallel tree of HTML pages
//! and mirrors a static-assets tree next to them:
//!
//! - [`mirror`] replaces a destination tree with a verbatim copy of a source tree
//! - [`ContentWalker`] finds markdown files and maps `a/b/c.md` to `a/b/c.html`
//! - [`render_page`] renders one page through `mdsite-renderer`
//! - [`SiteBuilder`] resets the output directory and runs the steps above
//!
//! All I/O goes through [`mdsite_storage::Storage`] carried by a
//! [`BuildContext`], so the whole pipeline runs against an in-memory tree
//! in tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mdsite_build::{BuildContext, BuildPaths, SiteBuilder};
//! use mdsite_renderer::CmarkEngine;
//! use mdsite_storage::FsStorage;
//!
//! let ctx = BuildContext::new(Arc::new(FsStorage::new()), Arc::new(CmarkEngine::new()), "/docs", "docs");
//! let report = SiteBuilder::new(ctx, BuildPaths::default()).build()?;
//! println!("{} pages", report.pages);
//! ```

mod builder;
mod context;
mod error;
mod mirror;
mod page;
mod walker;

pub use builder::{BuildPaths, BuildReport, SiteBuilder};
pub use context::BuildContext;
pub use error::BuildError;
pub use mirror::mirror;
pub use page::render_page;
pub use walker::{ContentWalker, HTML_SUFFIX, MARKDOWN_SUFFIX, PageJob, destination_for, walk_and_render};
