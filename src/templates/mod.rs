//! Page templates
//!
//! Minimal HTML shells around rendered content. Styling is left to whatever
//! stylesheet the site ships in its static directory.

use crate::config::SiteConfig;
use crate::content::{Post, PostRef};
use crate::feed::blog_card;
use crate::helpers::{date_xml, full_date, html_escape, link_to, post_path, topic_path};

/// Wrap `body` in a complete HTML document
pub fn layout(config: &SiteConfig, title: &str, body: &str) -> String {
    let page_title = if title.is_empty() || title == config.title {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(title), html_escape(&config.title))
    };

    let description = if config.description.is_empty() {
        String::new()
    } else {
        format!(
            "\n<meta name=\"description\" content=\"{}\">",
            html_escape(&config.description)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generator" content="garden-rs {version}">{description}
<title>{page_title}</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<header><a class="site-title" href="/">{site_title}</a></header>
<main>
{body}
</main>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        description = description,
        page_title = page_title,
        site_title = html_escape(&config.title),
        body = body,
    )
}

/// Home page around a rendered feed
pub fn feed_page(config: &SiteConfig, feed_html: &str) -> String {
    layout(config, "", feed_html)
}

/// A single post with its rendered body and backlinks
pub fn post_page(config: &SiteConfig, post: &Post, content_html: &str, backlinks: &[PostRef]) -> String {
    let tags: String = post
        .tags
        .iter()
        .map(|tag| format!(r#"<li>{}</li>"#, link_to(&topic_path(tag), tag)))
        .collect();
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="post-tags">{}</ul>"#, tags)
    };

    let linked_from = if backlinks.is_empty() {
        String::new()
    } else {
        let items: String = backlinks
            .iter()
            .map(|p| format!("<li>{}</li>", link_to(&post_path(&p.slug), &p.title)))
            .collect();
        format!(
            r#"<aside class="backlinks"><h2>Linked from</h2><ul>{}</ul></aside>"#,
            items
        )
    };

    let body = format!(
        r#"<article class="post" data-slug="{slug}">
<h1 class="post-title">{title}</h1>
<time datetime="{datetime}">{date}</time>{tags}
<div class="post-content">{content}</div>
{linked_from}</article>"#,
        slug = html_escape(&post.slug),
        title = html_escape(&post.title),
        datetime = date_xml(&post.date),
        date = full_date(&post.date),
        tags = tags,
        content = content_html,
        linked_from = linked_from,
    );

    layout(config, &post.title, &body)
}

/// Posts filed under one topic
pub fn topic_page(config: &SiteConfig, name: &str, posts: &[&Post]) -> String {
    let cards: String = posts.iter().map(|p| blog_card(p)).collect();
    let body = format!(
        r#"<section class="topic"><h1>{}</h1><div class="feed-list">{}</div></section>"#,
        html_escape(name),
        cards
    );
    layout(config, name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post() -> Post {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Post::new("1", "Alpha", date).with_tags(["Rust"])
    }

    #[test]
    fn test_layout_title() {
        let config = SiteConfig::default();
        let html = layout(&config, "Alpha", "<p>x</p>");
        assert!(html.contains("<title>Alpha | Garden</title>"));
        assert!(html.contains("<p>x</p>"));

        let html = layout(&config, "", "");
        assert!(html.contains("<title>Garden</title>"));
    }

    #[test]
    fn test_post_page() {
        let config = SiteConfig::default();
        let backlinks = vec![PostRef::new("Beta", "beta")];
        let html = post_page(&config, &post(), "<p>body</p>", &backlinks);

        assert!(html.contains(r#"<h1 class="post-title">Alpha</h1>"#));
        assert!(html.contains(r#"<time datetime="2024-06-01T12:00:00+00:00">June 1, 2024</time>"#));
        assert!(html.contains(r#"<a href="/topics/rust">Rust</a>"#));
        assert!(html.contains(r#"<div class="post-content"><p>body</p></div>"#));
        assert!(html.contains(r#"<a href="/beta">Beta</a>"#));
    }

    #[test]
    fn test_post_page_without_backlinks() {
        let config = SiteConfig::default();
        let html = post_page(&config, &post(), "", &[]);
        assert!(!html.contains("Linked from"));
    }

    #[test]
    fn test_topic_page() {
        let config = SiteConfig::default();
        let post = post();
        let html = topic_page(&config, "rust", &[&post]);
        assert!(html.contains("<h1>rust</h1>"));
        assert!(html.contains(r#"href="/alpha""#));
    }
}
