//! Local markdown directory content source

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{sort_newest_first, ContentSource, SourceError};
use crate::content::{FrontMatter, Post};

/// Loads posts from markdown files with front-matter
#[derive(Debug, Clone)]
pub struct MarkdownDirSource {
    posts_dir: PathBuf,
    render_drafts: bool,
}

impl MarkdownDirSource {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            render_drafts: false,
        }
    }

    /// Include posts marked `published: false`
    pub fn render_drafts(mut self, render_drafts: bool) -> Self {
        self.render_drafts = render_drafts;
        self
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load a single post from a file; `None` for unpublished drafts
    fn load_post(&self, path: &Path) -> Result<Option<Post>, SourceError> {
        let content =
            fs::read_to_string(path).map_err(|e| SourceError::Io(path.to_path_buf(), e))?;
        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| SourceError::FrontMatter(path.to_path_buf(), e))?;

        if !fm.published && !self.render_drafts {
            tracing::debug!("Skipping draft {:?}", path);
            return Ok(None);
        }

        let file_modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        let date = fm
            .parse_date()
            .or(file_modified)
            .unwrap_or_else(Utc::now);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        // Relative path without extension, stable across runs
        let id = path
            .strip_prefix(&self.posts_dir)
            .unwrap_or(path)
            .with_extension("")
            .to_string_lossy()
            .replace('\\', "/");

        let title = fm.title.unwrap_or_else(|| stem.clone());
        let slug = fm.slug.unwrap_or(stem);

        Ok(Some(
            Post::new(id, title, date)
                .with_slug(slug)
                .with_tags(fm.tags)
                .with_content(body),
        ))
    }
}

impl ContentSource for MarkdownDirSource {
    fn name(&self) -> &str {
        "markdown"
    }

    fn fetch_posts(&self) -> Result<Vec<Post>, SourceError> {
        if !self.posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }
            match self.load_post(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_posts() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "alpha.md",
            "---\ntitle: Alpha\ndate: 2024-01-02\ntags: [rust]\n---\nSee [[Beta]]\n",
        );
        write(
            &dir,
            "notes/beta-note.md",
            "---\ntitle: Beta\nslug: beta\ndate: 2024-03-01\n---\nBody\n",
        );
        write(&dir, "ignored.txt", "not a post");

        let posts = MarkdownDirSource::new(dir.path()).fetch_posts().unwrap();
        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].title, "Beta");
        assert_eq!(posts[0].slug, "beta");
        assert_eq!(posts[0].id, "notes/beta-note");

        assert_eq!(posts[1].slug, "alpha");
        assert_eq!(posts[1].tags, vec!["rust"]);
        assert_eq!(posts[1].content, "See [[Beta]]\n");
    }

    #[test]
    fn test_title_from_filename() {
        let dir = TempDir::new().unwrap();
        write(&dir, "plain-note.md", "Just text\n");

        let posts = MarkdownDirSource::new(dir.path()).fetch_posts().unwrap();
        assert_eq!(posts[0].title, "plain-note");
        assert_eq!(posts[0].slug, "plain-note");
    }

    #[test]
    fn test_drafts() {
        let dir = TempDir::new().unwrap();
        write(&dir, "draft.md", "---\ntitle: Draft\npublished: false\n---\nwip\n");

        let source = MarkdownDirSource::new(dir.path());
        assert!(source.fetch_posts().unwrap().is_empty());

        let source = source.render_drafts(true);
        assert_eq!(source.fetch_posts().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_file_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.md", "{\"title\": \"Broken\"\n\nno closing brace\n");
        write(&dir, "ok.md", "---\ntitle: Ok\n---\nfine\n");

        let posts = MarkdownDirSource::new(dir.path()).fetch_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Ok");
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = MarkdownDirSource::new(dir.path().join("nope"));
        assert!(source.fetch_posts().unwrap().is_empty());
    }
}
