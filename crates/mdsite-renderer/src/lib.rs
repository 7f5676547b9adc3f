//! Page rendering primitives for mdsite.
//!
//! Everything in this crate is pure string processing; reading sources and
//! writing pages is left to `mdsite-build`.
//!
//! A page goes through four steps:
//!
//! 1. [`extract_title`] finds the first top-level `# ` heading.
//! 2. A [`MarkdownEngine`] turns the markdown into an HTML fragment.
//!    [`CmarkEngine`] is the default, backed by `pulldown-cmark`.
//! 3. [`Template::render`] substitutes `{{ Title }}` and `{{ Content }}`.
//! 4. [`rewrite_base_path`] prefixes root-relative `href`/`src` values.
//!
//! [`render_html`] runs all four.
//!
//! # Example
//!
//! ```
//! use mdsite_renderer::{CmarkEngine, Template, render_html};
//!
//! let template = Template::new("<title>{{ Title }}</title>{{ Content }}");
//! let html = render_html("# Hello\n\n[up](/)", &template, "/docs/", &CmarkEngine::new());
//! assert!(html.contains("<title>Hello</title>"));
//! assert!(html.contains(r#"href="/docs/""#));
//! ```

mod engine;
mod rewrite;
mod template;
mod title;

pub use engine::{CmarkEngine, MarkdownEngine};
pub use rewrite::rewrite_base_path;
pub use template::{CONTENT_TOKEN, TITLE_TOKEN, Template};
pub use title::{UNTITLED, extract_title};

/// Render a complete page from markdown source.
///
/// Extracts the title, renders the body with `engine`, fills `template` and
/// rewrites root-relative URLs against `base_path`.
pub fn render_html(
    markdown: &str,
    template: &Template,
    base_path: &str,
    engine: &dyn MarkdownEngine,
) -> String {
    let title = extract_title(markdown);
    let content = engine.render(markdown);
    let page = template.render(&title, &content);
    rewrite_base_path(&page, base_path)
}
