//! Single page rendering.

use std::path::Path;

use mdsite_renderer::{Template, render_html};

use crate::context::BuildContext;
use crate::error::BuildError;

/// Render one markdown file to an HTML page.
///
/// Reads `markdown_path`, renders it through `template` with the context's
/// engine and base path, then writes the result to `output_path`, creating
/// missing parent directories and overwriting any existing file.
///
/// # Errors
///
/// Returns [`BuildError::Storage`] if the source can't be read or the page
/// can't be written.
pub fn render_page(
    ctx: &BuildContext,
    markdown_path: &Path,
    template: &Template,
    output_path: &Path,
) -> Result<(), BuildError> {
    tracing::info!(
        source = %markdown_path.display(),
        output = %output_path.display(),
        "Generating page"
    );

    let markdown = ctx.storage.read_to_string(markdown_path)?;
    let html = render_html(&markdown, template, &ctx.base_path, ctx.engine.as_ref());

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        ctx.storage.create_dir_all(parent)?;
    }
    ctx.storage.write(output_path, &html)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mdsite_renderer::CmarkEngine;
    use mdsite_storage::{MockStorage, Storage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    const TEMPLATE: &str =
        "<html><head><title>{{ Title }}</title></head><body>{{ Content }}</body></html>";

    fn context(storage: &Arc<MockStorage>, base_path: &str) -> BuildContext {
        BuildContext::new(
            Arc::clone(storage) as Arc<dyn Storage>,
            Arc::new(CmarkEngine::new()),
            base_path,
            "out",
        )
    }

    #[test]
    fn test_render_page_full() {
        let storage = Arc::new(
            MockStorage::new().with_file("content/about.md", "# About\n\n[Home](/index.html)\n"),
        );
        let ctx = context(&storage, "/docs/");

        render_page(
            &ctx,
            Path::new("content/about.md"),
            &Template::new(TEMPLATE),
            Path::new("out/about.html"),
        )
        .unwrap();

        assert_eq!(
            storage.file("out/about.html").as_deref(),
            Some(
                "<html><head><title>About</title></head><body><h1>About</h1>\n\
                 <p><a href=\"/docs/index.html\">Home</a></p>\n</body></html>"
            )
        );
    }

    #[test]
    fn test_render_page_creates_parents() {
        let storage = Arc::new(MockStorage::new().with_file("src.md", "text"));
        let ctx = context(&storage, "/");

        render_page(
            &ctx,
            Path::new("src.md"),
            &Template::new("{{ Title }}"),
            Path::new("a/b/c/page.html"),
        )
        .unwrap();

        assert_eq!(storage.file("a/b/c/page.html").as_deref(), Some("Untitled"));
    }

    #[test]
    fn test_render_page_overwrites() {
        let storage = Arc::new(
            MockStorage::new()
                .with_file("src.md", "# New")
                .with_file("out/page.html", "stale"),
        );
        let ctx = context(&storage, "/");

        render_page(
            &ctx,
            Path::new("src.md"),
            &Template::new("{{ Title }}"),
            Path::new("out/page.html"),
        )
        .unwrap();

        assert_eq!(storage.file("out/page.html").as_deref(), Some("New"));
    }

    #[test]
    fn test_render_page_missing_source() {
        let storage = Arc::new(MockStorage::new());
        let ctx = context(&storage, "/");

        let err = render_page(
            &ctx,
            Path::new("content/missing.md"),
            &Template::new(""),
            Path::new("out/missing.html"),
        )
        .unwrap_err();

        let BuildError::Storage(inner) = err else {
            panic!("expected storage error");
        };
        assert_eq!(inner.kind, StorageErrorKind::NotFound);
        assert!(!storage.exists(Path::new("out/missing.html")));
    }

    #[test]
    fn test_render_page_write_failure() {
        let storage = Arc::new(
            MockStorage::new()
                .with_file("src.md", "x")
                .with_dir("out")
                .with_unwritable("out"),
        );
        let ctx = context(&storage, "/");

        let err = render_page(
            &ctx,
            Path::new("src.md"),
            &Template::new(""),
            Path::new("out/page.html"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("out/page.html"));
    }
}
