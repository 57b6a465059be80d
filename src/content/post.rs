//! Post, index entry and topic models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title used when a source record carries none
pub const UNTITLED: &str = "Untitled";

/// A garden post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier assigned by the content source
    pub id: String,

    /// URL-safe unique name, never empty
    pub slug: String,

    /// Human-facing title, used to resolve wiki links
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Post tags
    pub tags: Vec<String>,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Create a post, deriving the slug from the title (or the id when the
    /// title slugifies to nothing)
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        let id = id.into();
        let title = title.into();
        let slug = derive_slug(&title, &id);
        Self {
            id,
            slug,
            title,
            date,
            tags: Vec::new(),
            content: String::new(),
        }
    }

    /// Set an explicit slug; empty slugs are ignored
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        if !slug.trim().is_empty() {
            self.slug = slug;
        }
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// The `{title, slug}` entry this post contributes to the post index
    pub fn to_ref(&self) -> PostRef {
        PostRef {
            title: self.title.clone(),
            slug: self.slug.clone(),
        }
    }

    /// Whether the post carries `topic` as a tag (case-insensitive)
    pub fn has_topic(&self, topic: &str) -> bool {
        let topic = topic.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == topic)
    }
}

/// Slug fallback chain: slugified title, then the id itself
fn derive_slug(title: &str, id: &str) -> String {
    let from_title = slug::slugify(title);
    if !from_title.is_empty() && title != UNTITLED {
        return from_title;
    }
    if !id.is_empty() {
        return id.to_string();
    }
    if from_title.is_empty() {
        "untitled".to_string()
    } else {
        from_title
    }
}

/// One entry of the post index used to resolve wiki links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    pub title: String,
    pub slug: String,
}

impl PostRef {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
        }
    }
}

/// Build the post index, preserving the order of `posts`
pub fn post_index(posts: &[Post]) -> Vec<PostRef> {
    posts.iter().map(Post::to_ref).collect()
}

/// A tag aggregated across posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: String,
    pub count: usize,
}

impl Topic {
    /// Aggregate topics from post tags, most used first, ties by name.
    ///
    /// Tags differing only in case are one topic, named by the first
    /// spelling seen.
    pub fn collect(posts: &[Post]) -> Vec<Topic> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut topics: Vec<Topic> = Vec::new();
        for post in posts {
            for tag in &post.tags {
                let i = *positions.entry(tag.to_lowercase()).or_insert_with(|| {
                    topics.push(Topic {
                        name: tag.clone(),
                        count: 0,
                    });
                    topics.len() - 1
                });
                topics[i].count += 1;
            }
        }

        topics.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        topics
    }
}
