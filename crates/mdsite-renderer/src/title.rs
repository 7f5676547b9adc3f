//! Page title extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when a document has no top-level heading.
pub const UNTITLED: &str = "Untitled";

/// A line starting with a single `#`, horizontal whitespace, then text.
///
/// `##` never matches since the second character must be whitespace.
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+([^ \t\r\n][^\r\n]*)").unwrap());

/// Extract the page title from the first top-level heading.
///
/// Scans every line, not just the first. The heading text is returned as
/// written, inline markup included. Falls back to [`UNTITLED`].
///
/// # Example
///
/// ```
/// use mdsite_renderer::extract_title;
///
/// assert_eq!(extract_title("# Hello World\nbody"), "Hello World");
/// assert_eq!(extract_title("no heading"), "Untitled");
/// ```
pub fn extract_title(markdown: &str) -> String {
    H1_RE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNTITLED.to_owned(), |m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_heading() {
        assert_eq!(extract_title("# Hello World\n..."), "Hello World");
    }

    #[test]
    fn test_no_heading() {
        assert_eq!(extract_title("Just some text\nand more"), "Untitled");
        assert_eq!(extract_title(""), "Untitled");
    }

    #[test]
    fn test_heading_on_third_line() {
        assert_eq!(extract_title("intro\n\n# Later Title\nbody"), "Later Title");
    }

    #[test]
    fn test_first_of_multiple_headings() {
        assert_eq!(extract_title("# First\n\n# Second\n"), "First");
    }

    #[test]
    fn test_lower_level_headings_ignored() {
        assert_eq!(extract_title("## Section\n### Sub\n"), "Untitled");
        assert_eq!(extract_title("## Section\n# Real\n"), "Real");
    }

    #[test]
    fn test_hash_without_space_ignored() {
        assert_eq!(extract_title("#hashtag\n"), "Untitled");
    }

    #[test]
    fn test_heading_without_text_ignored() {
        assert_eq!(extract_title("#   \n# Named\n"), "Named");
        assert_eq!(extract_title("#\nfoo\n"), "Untitled");
    }

    #[test]
    fn test_indented_heading_ignored() {
        assert_eq!(extract_title("  # Indented\n"), "Untitled");
    }

    #[test]
    fn test_inline_formatting_kept() {
        assert_eq!(
            extract_title("# The **bold** `code` title\n"),
            "The **bold** `code` title"
        );
    }

    #[test]
    fn test_tab_separator_and_crlf() {
        assert_eq!(extract_title("#\tTabbed\r\nbody\r\n"), "Tabbed");
    }

    #[test]
    fn test_multiple_spaces_after_marker() {
        assert_eq!(extract_title("#    Spaced Out"), "Spaced Out");
    }
}
