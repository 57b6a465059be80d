//! List site content

use anyhow::Result;

use crate::content::{LinkGraph, ResolvedLink, Topic};
use crate::helpers::month_label;
use crate::source::ContentSource;

/// List garden content by type
pub fn run(source: &dyn ContentSource, content_type: &str) -> Result<()> {
    let posts = source.fetch_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {} - {} [/{}]", month_label(&post.date), post.title, post.slug);
            }
        }
        "topic" | "topics" | "tag" | "tags" => {
            let topics = Topic::collect(&posts);
            println!("Topics ({}):", topics.len());
            for topic in topics {
                println!("  {:03} {}", topic.count, topic.name);
            }
        }
        "link" | "links" => {
            let graph = LinkGraph::build(&posts);
            println!("Links:");
            for post in &posts {
                let links = graph.links_from(&post.slug);
                if links.is_empty() {
                    continue;
                }
                println!("  {} [/{}]", post.title, post.slug);
                for link in links {
                    match link {
                        ResolvedLink::Page { slug, display } => {
                            println!("    -> {} [/{}]", display, slug)
                        }
                        ResolvedLink::Dead { display } => println!("    -> {} (not found)", display),
                    }
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, topics, links",
                content_type
            );
        }
    }

    Ok(())
}
