//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Site path of a post
///
/// # Examples
/// ```ignore
/// post_path("alpha") // -> "/alpha"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/{}", slug.trim_start_matches('/'))
}

/// Site path of a topic listing; topic names are lowercased
///
/// # Examples
/// ```ignore
/// topic_path("Machine Learning") // -> "/topics/machine%20learning"
/// ```
pub fn topic_path(name: &str) -> String {
    format!("/topics/{}", encode_segment(&name.to_lowercase()))
}

/// Feed path with a tab selected
pub fn feed_path(tab: &str) -> String {
    format!("/?tab={}", encode_segment(tab))
}
