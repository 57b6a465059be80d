//! Content rendering pipeline: markup conversion, then wiki-link resolution

use lazy_static::lazy_static;

use super::markdown::{MarkdownRenderer, MarkupConverter};
use super::post::PostRef;
use super::wikilink::resolve_links;
use super::RenderError;
use crate::helpers::html_escape;

/// Default `max_content_bytes` in the site configuration
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 4 * 1024 * 1024;

lazy_static! {
    static ref DEFAULT_PIPELINE: ContentPipeline = ContentPipeline::new();
}

/// Render one post body with the default markdown pipeline. No size cap
/// applies here; see [`ContentPipeline::max_content_bytes`].
pub fn render(raw_content: &str, index: &[PostRef]) -> Result<String, RenderError> {
    DEFAULT_PIPELINE.render(raw_content, index)
}

/// Turns raw post bodies into link-resolved HTML.
///
/// Holds no per-render state, so one pipeline can serve concurrent renders
/// against the same index.
pub struct ContentPipeline<C = MarkdownRenderer> {
    converter: C,
    max_content_bytes: Option<usize>,
}

impl ContentPipeline<MarkdownRenderer> {
    pub fn new() -> Self {
        Self::with_converter(MarkdownRenderer::new())
    }
}

impl Default for ContentPipeline<MarkdownRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MarkupConverter> ContentPipeline<C> {
    pub fn with_converter(converter: C) -> Self {
        Self {
            converter,
            max_content_bytes: None,
        }
    }

    /// Reject bodies longer than `limit` bytes; unlimited otherwise
    pub fn max_content_bytes(mut self, limit: usize) -> Self {
        self.max_content_bytes = Some(limit);
        self
    }

    /// Convert `raw_content` to HTML, then resolve its wiki links against
    /// `index`. Links are resolved on the converter's output, never on the
    /// raw markup.
    pub fn render(&self, raw_content: &str, index: &[PostRef]) -> Result<String, RenderError> {
        if raw_content.is_empty() {
            return Ok(String::new());
        }
        if let Some(limit) = self.max_content_bytes {
            if raw_content.len() > limit {
                return Err(RenderError::TooLarge {
                    size: raw_content.len(),
                    limit,
                });
            }
        }

        let html = self.converter.to_html(raw_content)?;
        Ok(resolve_links(&html, index))
    }

    /// Like [`render`](Self::render), but falls back to the escaped raw text
    pub fn render_or_escape(&self, raw_content: &str, index: &[PostRef]) -> String {
        match self.render(raw_content, index) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Rendering as plain text: {}", e);
                format!("<pre>{}</pre>", html_escape(raw_content))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl MarkupConverter for Failing {
        fn to_html(&self, _markup: &str) -> Result<String, RenderError> {
            Err(RenderError::conversion("boom"))
        }
    }

    /// Passes markup through untouched
    struct Verbatim;

    impl MarkupConverter for Verbatim {
        fn to_html(&self, markup: &str) -> Result<String, RenderError> {
            Ok(markup.to_string())
        }
    }

    fn alpha() -> Vec<PostRef> {
        vec![PostRef::new("Alpha", "alpha")]
    }

    #[test]
    fn test_empty_content() {
        let pipeline = ContentPipeline::with_converter(Failing);
        assert_eq!(pipeline.render("", &alpha()).unwrap(), "");
    }

    #[test]
    fn test_conversion_failure_is_error() {
        let pipeline = ContentPipeline::with_converter(Failing);
        let err = pipeline.render("# hi", &alpha()).unwrap_err();
        assert!(matches!(err, RenderError::Conversion { .. }));
    }

    #[test]
    fn test_fallback_escapes_raw() {
        let pipeline = ContentPipeline::with_converter(Failing);
        let html = pipeline.render_or_escape("<b>[[Alpha]]</b>", &alpha());
        assert_eq!(html, "<pre>&lt;b&gt;[[Alpha]]&lt;/b&gt;</pre>");
    }

    #[test]
    fn test_too_large() {
        let pipeline = ContentPipeline::with_converter(Verbatim).max_content_bytes(4);
        let err = pipeline.render("hello", &alpha()).unwrap_err();
        assert!(matches!(err, RenderError::TooLarge { size: 5, limit: 4 }));
    }

    #[test]
    fn test_uncapped_by_default() {
        let body = "a".repeat(DEFAULT_MAX_CONTENT_BYTES + 1);
        let html = ContentPipeline::with_converter(Verbatim)
            .render(&body, &alpha())
            .unwrap();
        assert_eq!(html.len(), body.len());
    }

    #[test]
    fn test_resolves_on_converter_output() {
        struct Emits;
        impl MarkupConverter for Emits {
            fn to_html(&self, _markup: &str) -> Result<String, RenderError> {
                Ok("<p>[[Alpha]]</p>".to_string())
            }
        }

        let pipeline = ContentPipeline::with_converter(Emits);
        let html = pipeline.render("anything", &alpha()).unwrap();
        assert_eq!(
            html,
            r#"<p><a href="/alpha" class="wiki-link" data-slug="alpha">Alpha</a></p>"#
        );
    }

    #[test]
    fn test_default_render() {
        let html = render("See [[Alpha]] now", &alpha()).unwrap();
        assert_eq!(
            html,
            "<p>See <a href=\"/alpha\" class=\"wiki-link\" data-slug=\"alpha\">Alpha</a> now</p>\n"
        );
    }

    #[test]
    fn test_no_links_matches_markdown_output() {
        let raw = "# Heading\n\nSome *text* with a [link](/x) and `code`.\n";
        let expected = MarkdownRenderer::new().to_html(raw).unwrap();
        assert_eq!(render(raw, &alpha()).unwrap(), expected);
    }

    #[test]
    fn test_alias_and_dead_links() {
        let html = render("See [[Alpha|here]]", &alpha()).unwrap();
        assert!(html.contains(r#"<a href="/alpha" class="wiki-link" data-slug="alpha">here</a>"#));

        let html = render("See [[Ghost]]", &[]).unwrap();
        assert!(html.contains(r#"<span class="wiki-link-dead" title="Page not found">Ghost</span>"#));
    }

    #[test]
    fn test_lowercase_reference() {
        let html = render("[[alpha]]", &alpha()).unwrap();
        assert!(html.contains(r#"data-slug="alpha">alpha</a>"#));
    }

    #[test]
    fn test_duplicate_titles_first_wins() {
        let index = vec![PostRef::new("A", "a1"), PostRef::new("A", "a2")];
        let html = render("[[A]]", &index).unwrap();
        assert!(html.contains(r#"href="/a1""#));
        assert!(!html.contains("a2"));
    }

    #[test]
    fn test_resolving_output_again_is_noop() {
        let html = render("Tom &amp; [[Alpha|Jerry's]] <3", &alpha()).unwrap();
        assert_eq!(super::resolve_links(&html, &alpha()), html);
        assert!(!html.contains("&amp;amp;"));
    }
}
