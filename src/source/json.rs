//! JSON export content source

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{sort_newest_first, ContentSource, SourceError};
use crate::content::{parse_date_string, Post, UNTITLED};

/// One post as exported from a CMS. Every field but `id` may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    pub id: String,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub created_time: Option<String>,
    pub tags: Vec<String>,
    pub content: String,
}

impl PostRecord {
    /// Apply the record defaults: untitled, slug from id, date from creation
    /// time
    pub fn into_post(self) -> Post {
        let title = non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string());
        let slug = non_empty(self.slug).unwrap_or_else(|| self.id.clone());

        let date = self
            .date
            .as_deref()
            .and_then(parse_date_string)
            .or_else(|| self.created_time.as_deref().and_then(parse_date_string))
            .unwrap_or_else(|| {
                tracing::debug!("Post {} has no usable date, using now", self.id);
                Utc::now()
            });

        Post::new(self.id, title, date)
            .with_slug(slug)
            .with_tags(self.tags)
            .with_content(self.content)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads posts from a JSON array of [`PostRecord`]s
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for JsonSource {
    fn name(&self) -> &str {
        "json"
    }

    fn fetch_posts(&self) -> Result<Vec<Post>, SourceError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| SourceError::Io(self.path.clone(), e))?;
        let records: Vec<PostRecord> =
            serde_json::from_str(&content).map_err(|e| SourceError::Json(self.path.clone(), e))?;

        let mut posts: Vec<Post> = records.into_iter().map(PostRecord::into_post).collect();
        sort_newest_first(&mut posts);

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.path);
        Ok(posts)
    }
}
