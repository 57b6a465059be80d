//! garden-rs: a digital garden renderer
//!
//! Posts come from a [`source::ContentSource`], their markdown bodies are
//! rendered to HTML and `[[Wiki Link]]` references are resolved against the
//! titles of every other post. The garden can be written out as static files
//! or served by a development server that renders on each request.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod source;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::{SiteConfig, SourceKind};
use content::{ContentPipeline, MarkdownRenderer};
use source::{ContentSource, JsonSource, MarkdownDirSource};

/// The main garden application
#[derive(Debug, Clone)]
pub struct Garden {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Local markdown posts directory
    pub posts_dir: PathBuf,
    /// Static assets copied into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Garden {
    /// Create a new garden from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a garden from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
            public_dir,
        }
    }

    /// Construct the content source named by the configuration
    pub fn content_source(&self) -> Box<dyn ContentSource> {
        match self.config.source {
            SourceKind::Markdown => Box::new(
                MarkdownDirSource::new(&self.posts_dir).render_drafts(self.config.render_drafts),
            ),
            SourceKind::Json => Box::new(JsonSource::new(self.base_dir.join(&self.config.json_path))),
        }
    }

    /// Rendering pipeline configured for this site
    pub fn pipeline(&self) -> ContentPipeline {
        let renderer = MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        );
        ContentPipeline::with_converter(renderer).max_content_bytes(self.config.max_content_bytes)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self, self.content_source().as_ref())
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
