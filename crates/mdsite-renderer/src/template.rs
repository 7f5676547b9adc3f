//! Page template with `{{ Title }}` and `{{ Content }}` placeholders.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Placeholder replaced by the page title.
pub const TITLE_TOKEN: &str = "{{ Title }}";

/// Placeholder replaced by the rendered markdown body.
pub const CONTENT_TOKEN: &str = "{{ Content }}";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ (Title|Content) \}\}").unwrap());

/// An HTML page template.
///
/// Loaded once per build and shared by every page. Any text besides the two
/// placeholders passes through unchanged; a template missing one of them is
/// valid and simply never receives that value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Wrap template text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Substitute every placeholder occurrence in one pass.
    ///
    /// Inserted values are copied literally. They are neither escaped nor
    /// scanned again, so a title containing `{{ Content }}` stays as written.
    #[must_use]
    pub fn render(&self, title: &str, content: &str) -> String {
        TOKEN_RE
            .replace_all(&self.text, |caps: &Captures<'_>| match &caps[1] {
                "Title" => title,
                _ => content,
            })
            .into_owned()
    }
}
