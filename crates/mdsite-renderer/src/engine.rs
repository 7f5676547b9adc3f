//! Markdown engine boundary.
//!
//! The pipeline only needs `markdown text -> html fragment`. [`MarkdownEngine`]
//! is that contract; [`CmarkEngine`] fulfils it with `pulldown-cmark`, and any
//! `Fn(&str) -> String` closure can stand in for it in tests.

use pulldown_cmark::{Options, Parser, html};

/// Converts markdown text into an HTML fragment.
pub trait MarkdownEngine: Send + Sync {
    /// Render `markdown` to HTML.
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownEngine for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Default [`MarkdownEngine`] backed by `pulldown-cmark`.
///
/// GitHub Flavored Markdown extensions (tables, strikethrough, task lists)
/// are enabled by default.
#[derive(Clone, Copy, Debug)]
pub struct CmarkEngine {
    gfm: bool,
}

impl Default for CmarkEngine {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl CmarkEngine {
    /// Create an engine with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl MarkdownEngine for CmarkEngine {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
