//! Content module - posts, markdown rendering and wiki-link resolution

mod error;
mod frontmatter;
pub mod links;
pub mod markdown;
pub mod pipeline;
mod post;
pub mod wikilink;

pub use error::RenderError;
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use links::{DeadLink, LinkGraph};
pub use markdown::{MarkdownRenderer, MarkupConverter};
pub use pipeline::{render, ContentPipeline};
pub use post::{post_index, Post, PostRef, Topic, UNTITLED};
pub use wikilink::{CrossReference, ResolvedLink};
