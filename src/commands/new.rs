//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::config::SourceKind;
use crate::Garden;

/// Scaffold a markdown post in the posts directory
pub fn create_post(garden: &Garden, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    if garden.config.source != SourceKind::Markdown {
        anyhow::bail!("New posts can only be created for the markdown source");
    }

    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title: {:?}", title);
    }

    fs::create_dir_all(&garden.posts_dir)?;
    let file_path = garden.posts_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now();
    let content = format!(
        "---\ntitle: {}\nslug: {}\ndate: {}\ntags: []\n---\n",
        serde_yaml::to_string(title)?.trim_end(),
        slug,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
