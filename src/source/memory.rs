//! In-memory content source

use super::{sort_newest_first, ContentSource, SourceError};
use crate::content::Post;

/// Serves a fixed set of posts
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: Vec<Post>,
}

impl MemorySource {
    pub fn new(mut posts: Vec<Post>) -> Self {
        sort_newest_first(&mut posts);
        Self { posts }
    }
}

impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_posts(&self) -> Result<Vec<Post>, SourceError> {
        Ok(self.posts.clone())
    }
}
