//! Link graph across the whole garden: outgoing links, backlinks, dead links

use std::collections::HashMap;

use super::post::{post_index, Post, PostRef};
use super::wikilink::{extract_references, ResolvedLink};

/// A wiki link that matched no post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLink {
    /// Post containing the reference
    pub source: PostRef,
    /// Title that failed to resolve
    pub target: String,
}

/// Resolved wiki links between posts, keyed by slug
#[derive(Debug, Default)]
pub struct LinkGraph {
    outgoing: HashMap<String, Vec<ResolvedLink>>,
    backlinks: HashMap<String, Vec<PostRef>>,
    dead: Vec<DeadLink>,
}

impl LinkGraph {
    /// Scan every post body for references.
    ///
    /// Backlinks keep post order and list each linking post once; a post
    /// linking to itself is not its own backlink.
    pub fn build(posts: &[Post]) -> Self {
        let index = post_index(posts);
        let mut graph = LinkGraph::default();

        for post in posts {
            let mut links = Vec::new();
            for reference in extract_references(&post.content) {
                let link = reference.resolve(&index);
                match &link {
                    ResolvedLink::Page { slug, .. } => {
                        if slug != &post.slug {
                            let sources = graph.backlinks.entry(slug.clone()).or_default();
                            if !sources.iter().any(|s| s.slug == post.slug) {
                                sources.push(post.to_ref());
                            }
                        }
                    }
                    ResolvedLink::Dead { .. } => graph.dead.push(DeadLink {
                        source: post.to_ref(),
                        target: reference.target.clone(),
                    }),
                }
                links.push(link);
            }
            graph.outgoing.insert(post.slug.clone(), links);
        }

        tracing::debug!(
            "Link graph: {} posts, {} dead links",
            graph.outgoing.len(),
            graph.dead.len()
        );
        graph
    }

    /// Links written in the post with `slug`, in document order
    pub fn links_from(&self, slug: &str) -> &[ResolvedLink] {
        self.outgoing.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Posts that link to `slug`
    pub fn backlinks(&self, slug: &str) -> &[PostRef] {
        self.backlinks.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dead_links(&self) -> &[DeadLink] {
        &self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(title: &str, content: &str) -> Post {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Post::new(title, title, date).with_content(content)
    }

    #[test]
    fn test_backlinks() {
        let posts = vec![
            post("Alpha", "links to [[Beta]] and [[beta|again]]"),
            post("Beta", "back to [[Alpha]] and [[Beta]]"),
            post("Gamma", "[[Beta]]"),
        ];
        let graph = LinkGraph::build(&posts);

        let to_beta: Vec<_> = graph.backlinks("beta").iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(to_beta, vec!["alpha", "gamma"]);
        assert_eq!(graph.backlinks("alpha").len(), 1);
        assert!(graph.backlinks("gamma").is_empty());
        assert_eq!(graph.links_from("alpha").len(), 2);
    }

    #[test]
    fn test_dead_links() {
        let posts = vec![post("Alpha", "[[Nowhere]] and [[Alpha]]")];
        let graph = LinkGraph::build(&posts);

        assert_eq!(
            graph.dead_links(),
            &[DeadLink {
                source: PostRef::new("Alpha", "alpha"),
                target: "Nowhere".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_slug() {
        let graph = LinkGraph::build(&[]);
        assert!(graph.links_from("missing").is_empty());
        assert!(graph.backlinks("missing").is_empty());
    }
}
