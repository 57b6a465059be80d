//! Report wiki links that resolve to no post

use anyhow::Result;

use crate::content::LinkGraph;
use crate::source::ContentSource;

/// Print every dead link; returns how many were found
pub fn run(source: &dyn ContentSource) -> Result<usize> {
    let posts = source.fetch_posts()?;
    let graph = LinkGraph::build(&posts);
    let dead = graph.dead_links();

    if dead.is_empty() {
        println!("No dead links in {} posts.", posts.len());
        return Ok(0);
    }

    println!("Dead links ({}):", dead.len());
    for link in dead {
        println!("  {} [/{}] -> [[{}]]", link.source.title, link.source.slug, link.target);
    }

    Ok(dead.len())
}
