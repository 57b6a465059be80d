//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::pipeline::DEFAULT_MAX_CONTENT_BYTES;
use crate::content::markdown::DEFAULT_THEME;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,

    // Content
    pub source: SourceKind,
    pub posts_dir: String,
    pub json_path: String,
    pub render_drafts: bool,
    pub max_content_bytes: usize,
    pub highlight: HighlightConfig,

    // Output
    pub public_dir: String,
    pub static_dir: String,

    // Server
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Garden".to_string(),
            description: String::new(),
            author: String::new(),
            url: "http://example.com".to_string(),

            source: SourceKind::default(),
            posts_dir: "posts".to_string(),
            json_path: "posts.json".to_string(),
            render_drafts: false,
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
            highlight: HighlightConfig::default(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Where posts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A directory of markdown files with front-matter
    #[default]
    Markdown,
    /// A JSON array of post records exported from a CMS
    Json,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}
