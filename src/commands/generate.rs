//! Generate static files

use anyhow::{Context, Result};

use crate::generator::Generator;
use crate::source::ContentSource;
use crate::Garden;

/// Fetch every post from `source` and write the site
pub fn run(garden: &Garden, source: &dyn ContentSource) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = source
        .fetch_posts()
        .with_context(|| format!("Failed to fetch posts from {} source", source.name()))?;
    tracing::info!("Loaded {} posts from {} source", posts.len(), source.name());

    let summary = Generator::new(garden).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts, {} topics, {} assets in {:.2}s",
        summary.posts,
        summary.topics,
        summary.assets,
        duration.as_secs_f64()
    );

    Ok(())
}
