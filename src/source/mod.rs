//! Content sources
//!
//! A content source is constructed explicitly and handed to whatever renders
//! the garden, so tests can swap in an in-memory source and a site can hold
//! several differently configured sources at once.

mod json;
mod markdown_dir;
mod memory;

use std::path::PathBuf;
use thiserror::Error;

use crate::content::{FrontMatterError, Post};

pub use json::{JsonSource, PostRecord};
pub use markdown_dir::MarkdownDirSource;
pub use memory::MemorySource;

/// Errors raised while fetching posts
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid post export `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("invalid front-matter in `{0}`")]
    FrontMatter(PathBuf, #[source] FrontMatterError),
}

/// Supplies the garden's posts
pub trait ContentSource: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Fetch every post, newest first
    fn fetch_posts(&self) -> Result<Vec<Post>, SourceError>;

    /// Look a single post up by slug
    fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, SourceError> {
        Ok(self.fetch_posts()?.into_iter().find(|p| p.slug == slug))
    }
}

/// Newest first; equal dates keep their fetch order
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
