//! Base-path rewriting for root-relative URLs.

/// Replace the leading `/` of every `href="/` and `src="/` with `base_path`.
///
/// This is a literal substring replacement over the whole document, not an
/// attribute-aware rewrite: no path normalization happens, so `/docs` turns
/// `href="/about"` into `href="/docsabout"`. Absolute URLs such as
/// `href="https://…"` do not match and are left alone.
///
/// # Example
///
/// ```
/// use mdsite_renderer::rewrite_base_path;
///
/// let html = rewrite_base_path(r#"<img src="/logo.png">"#, "/site/");
/// assert_eq!(html, r#"<img src="/site/logo.png">"#);
/// ```
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    html.replace(r#"href="/"#, &format!(r#"href="{base_path}"#))
        .replace(r#"src="/"#, &format!(r#"src="{base_path}"#))
}
