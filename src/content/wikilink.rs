//! `[[Wiki Link]]` cross-references
//!
//! A reference is written `[[Target]]` or `[[Target|Display]]`. Targets are
//! matched against post titles case-insensitively; the first post in index
//! order wins. Unmatched references render as dead-link spans instead of
//! anchors.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

use super::post::PostRef;
use crate::helpers::decode_entities;

lazy_static! {
    /// Single-level, non-greedy, never spans a line
    static ref WIKI_LINK_RE: Regex = Regex::new(r"\[\[(.*?)\]\]").unwrap();
}

const ALIAS_SEPARATOR: char = '|';

/// An unresolved `[[...]]` mention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    /// Title to resolve
    pub target: String,
    /// Text shown to the reader
    pub display: String,
}

impl CrossReference {
    /// Parse the body between `[[` and `]]`.
    ///
    /// With an alias only the first two `|`-separated segments count: in
    /// `[[A|b|c]]` the target is `A` and the display is `b`.
    pub fn parse(body: &str) -> Self {
        match body.split_once(ALIAS_SEPARATOR) {
            Some((target, rest)) => {
                let display = rest.split(ALIAS_SEPARATOR).next().unwrap_or(rest);
                Self {
                    target: target.to_string(),
                    display: display.to_string(),
                }
            }
            None => Self {
                target: body.to_string(),
                display: body.to_string(),
            },
        }
    }

    /// Resolve against the post index
    pub fn resolve(&self, index: &[PostRef]) -> ResolvedLink {
        match find_by_title(index, &self.target) {
            Some(post) => ResolvedLink::Page {
                slug: post.slug.clone(),
                display: self.display.clone(),
            },
            None => ResolvedLink::Dead {
                display: self.display.clone(),
            },
        }
    }
}

/// Case-insensitive exact title lookup, first match wins.
///
/// The target may come out of rendered HTML, so the entities the markdown
/// renderer emits are decoded before comparing.
pub fn find_by_title<'a>(index: &'a [PostRef], target: &str) -> Option<&'a PostRef> {
    let wanted = decode_entities(target).to_lowercase();
    index.iter().find(|p| p.title.to_lowercase() == wanted)
}

/// Outcome of resolving a [`CrossReference`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLink {
    /// Link to an existing post
    Page { slug: String, display: String },
    /// No post carries the target title
    Dead { display: String },
}

impl ResolvedLink {
    pub fn display(&self) -> &str {
        match self {
            ResolvedLink::Page { display, .. } | ResolvedLink::Dead { display } => display,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            ResolvedLink::Page { slug, .. } => Some(slug),
            ResolvedLink::Dead { .. } => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, ResolvedLink::Dead { .. })
    }
}

impl fmt::Display for ResolvedLink {
    /// Emits the HTML the styling layer keys on; display text is inserted as-is
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedLink::Page { slug, display } => write!(
                f,
                r#"<a href="/{slug}" class="wiki-link" data-slug="{slug}">{display}</a>"#
            ),
            ResolvedLink::Dead { display } => write!(
                f,
                r#"<span class="wiki-link-dead" title="Page not found">{display}</span>"#
            ),
        }
    }
}

/// Replace every `[[...]]` in `html` with its resolved link
pub fn resolve_links(html: &str, index: &[PostRef]) -> String {
    WIKI_LINK_RE
        .replace_all(html, |caps: &Captures| {
            CrossReference::parse(&caps[1]).resolve(index).to_string()
        })
        .into_owned()
}

/// Collect every `[[...]]` mention in document order
pub fn extract_references(text: &str) -> Vec<CrossReference> {
    WIKI_LINK_RE
        .captures_iter(text)
        .map(|caps| CrossReference::parse(&caps[1]))
        .collect()
}
