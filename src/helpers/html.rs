//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Undo [`html_escape`] and the entities the markdown renderer emits.
/// `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Generate an anchor tag for a site-relative path
pub fn link_to(path: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, path, html_escape(text))
}
