//! Generator module - renders the garden to static HTML files

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{post_index, ContentPipeline, LinkGraph, Post, PostRef, Topic};
use crate::feed::{Feed, Tab, Tabs};
use crate::templates;
use crate::Garden;

/// Everything needed to render pages for one fetch of posts.
///
/// Built fresh per fetch; rendering never mutates it.
pub struct Site<'a> {
    config: &'a SiteConfig,
    posts: &'a [Post],
    index: Vec<PostRef>,
    topics: Vec<Topic>,
    graph: LinkGraph,
}

impl<'a> Site<'a> {
    pub fn new(config: &'a SiteConfig, posts: &'a [Post]) -> Self {
        Self {
            config,
            posts,
            index: post_index(posts),
            topics: Topic::collect(posts),
            graph: LinkGraph::build(posts),
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.posts
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn index(&self) -> &[PostRef] {
        &self.index
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    /// Home page with `tab` selected
    pub fn feed_page(&self, tab: Tab) -> String {
        let feed = Feed::new(self.posts, &self.topics);
        templates::feed_page(self.config, &feed.render(&Tabs::with_active(tab)))
    }

    /// Render the post with `slug`, or `None` if no post has it
    pub fn post_page(&self, pipeline: &ContentPipeline, slug: &str) -> Option<String> {
        let post = self.posts.iter().find(|p| p.slug == slug)?;
        Some(self.render_post(pipeline, post))
    }

    fn render_post(&self, pipeline: &ContentPipeline, post: &Post) -> String {
        let html = pipeline.render_or_escape(&post.content, &self.index);
        templates::post_page(self.config, post, &html, self.graph.backlinks(&post.slug))
    }

    /// Posts tagged `name` (case-insensitive), or `None` for an unknown topic
    pub fn topic_page(&self, name: &str) -> Option<String> {
        let posts: Vec<&Post> = self.posts.iter().filter(|p| p.has_topic(name)).collect();
        if posts.is_empty() {
            return None;
        }
        Some(templates::topic_page(self.config, name, &posts))
    }
}

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub posts: usize,
    pub topics: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator<'a> {
    garden: &'a Garden,
    pipeline: ContentPipeline,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(garden: &'a Garden) -> Self {
        Self {
            garden,
            pipeline: garden.pipeline(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<Summary> {
        let public_dir = &self.garden.public_dir;
        fs::create_dir_all(public_dir)?;

        let site = Site::new(&self.garden.config, posts);
        let mut summary = Summary {
            assets: self.copy_static_assets()?,
            ..Default::default()
        };

        write_page(&public_dir.join("index.html"), &site.feed_page(Tab::Thoughts))?;
        write_page(
            &public_dir.join("topics").join("index.html"),
            &site.feed_page(Tab::Topics),
        )?;

        for post in site.posts() {
            if let Some(reason) = slug_conflict(&self.garden.static_dir, &post.slug) {
                tracing::warn!("Skipping post {:?}: {}", post.slug, reason);
                continue;
            }
            let html = site.render_post(&self.pipeline, post);
            write_page(&public_dir.join(&post.slug).join("index.html"), &html)?;
            summary.posts += 1;
        }

        for topic in site.topics() {
            let name = topic.name.to_lowercase();
            if !is_safe_segment(&name) {
                tracing::warn!("Skipping topic with unsafe name {:?}", topic.name);
                continue;
            }
            if let Some(html) = site.topic_page(&name) {
                write_page(
                    &public_dir.join("topics").join(&name).join("index.html"),
                    &html,
                )?;
                summary.topics += 1;
            }
        }

        tracing::debug!("Generated {:?}", summary);
        Ok(summary)
    }

    /// Copy the static directory (stylesheets, images) verbatim
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.garden.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.garden.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}

/// Top-level output names owned by the site itself
pub const RESERVED_SLUGS: [&str; 1] = ["topics"];

/// Why a post cannot live at `/{slug}/`, if it cannot.
///
/// Static assets are copied to the output root, so a top-level static entry
/// with the same name owns that path.
pub(crate) fn slug_conflict(static_dir: &Path, slug: &str) -> Option<&'static str> {
    if !is_safe_segment(slug) {
        Some("unsafe slug")
    } else if RESERVED_SLUGS.contains(&slug) {
        Some("slug is reserved")
    } else if static_dir.join(slug).exists() {
        Some("slug is taken by a static asset")
    } else {
        None
    }
}

/// A slug or topic usable as a single directory name under the output root
pub(crate) fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}
