//! Feed markup: tab bar, post cards and topic cards

use super::tabs::{Tab, Tabs};
use crate::content::{Post, Topic};
use crate::helpers::{feed_path, html_escape, month_label, post_path, topic_path};

/// Posts and topics shown by the feed
pub struct Feed<'a> {
    posts: &'a [Post],
    topics: &'a [Topic],
}

impl<'a> Feed<'a> {
    pub fn new(posts: &'a [Post], topics: &'a [Topic]) -> Self {
        Self { posts, topics }
    }

    /// Render the tab bar and the list of the active tab
    pub fn render(&self, tabs: &Tabs) -> String {
        let items: String = match tabs.active() {
            Tab::Thoughts => self.posts.iter().map(blog_card).collect(),
            Tab::Topics => self.topics.iter().map(topic_card).collect(),
        };

        format!(
            r#"<div class="feed">{}<div class="feed-list" data-tab="{}">{}</div></div>"#,
            tab_bar(tabs),
            tabs.active(),
            items
        )
    }
}

/// The two tab controls plus the indicator pill
pub fn tab_bar(tabs: &Tabs) -> String {
    let mut html = String::from(r#"<nav class="tabs">"#);

    match tabs.indicator() {
        Some(rect) => html.push_str(&format!(
            r#"<div class="tab-indicator" style="left: {}px; width: {}px"></div>"#,
            rect.left, rect.width
        )),
        None => html.push_str(r#"<div class="tab-indicator" hidden></div>"#),
    }

    for tab in Tab::ALL {
        let class = if tabs.is_active(tab) {
            "tab tab-active"
        } else {
            "tab"
        };
        html.push_str(&format!(
            r#"<a class="{}" href="{}" aria-selected="{}">{}</a>"#,
            class,
            feed_path(tab.label()),
            tabs.is_active(tab),
            tab
        ));
    }

    html.push_str("</nav>");
    html
}

/// A post entry: year and month, then the title
pub fn blog_card(post: &Post) -> String {
    format!(
        r#"<a class="blog-card" href="{}"><span class="card-meta">{}</span><span class="card-title">{}</span></a>"#,
        post_path(&post.slug),
        month_label(&post.date),
        html_escape(&post.title)
    )
}

/// A topic entry: zero-padded post count, then the name
pub fn topic_card(topic: &Topic) -> String {
    format!(
        r#"<a class="topic-card" href="{}"><span class="card-meta">{:03}</span><span class="card-title">{}</span></a>"#,
        topic_path(&topic.name),
        topic.count,
        html_escape(&topic.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::tabs::{Rect, TabLayout};
    use chrono::{TimeZone, Utc};

    fn posts() -> Vec<Post> {
        let date = Utc.with_ymd_and_hms(2024, 2, 9, 0, 0, 0).unwrap();
        vec![Post::new("1", "Fish & Chips", date).with_tags(["Food"])]
    }

    #[test]
    fn test_blog_card() {
        let html = blog_card(&posts()[0]);
        assert_eq!(
            html,
            r#"<a class="blog-card" href="/fish-chips"><span class="card-meta">2024 • 02</span><span class="card-title">Fish &amp; Chips</span></a>"#
        );
    }

    #[test]
    fn test_topic_card() {
        let topic = Topic {
            name: "Machine Learning".to_string(),
            count: 7,
        };
        let html = topic_card(&topic);
        assert!(html.contains(r#"href="/topics/machine%20learning""#));
        assert!(html.contains(r#"<span class="card-meta">007</span>"#));
        assert!(html.contains("Machine Learning</span>"));
    }

    #[test]
    fn test_feed_shows_active_list() {
        let posts = posts();
        let topics = Topic::collect(&posts);
        let feed = Feed::new(&posts, &topics);

        let html = feed.render(&Tabs::new());
        assert!(html.contains("blog-card"));
        assert!(!html.contains("topic-card"));
        assert!(html.contains(r#"data-tab="thoughts""#));

        let html = feed.render(&Tabs::with_active(Tab::Topics));
        assert!(html.contains("topic-card"));
        assert!(!html.contains("blog-card"));
    }

    #[test]
    fn test_tab_bar() {
        let mut tabs = Tabs::new();
        let html = tab_bar(&tabs);
        assert!(html.contains(r#"<div class="tab-indicator" hidden></div>"#));
        assert!(html.contains(
            r#"<a class="tab tab-active" href="/?tab=thoughts" aria-selected="true">thoughts</a>"#
        ));
        assert!(html.contains(r#"<a class="tab" href="/?tab=topics" aria-selected="false">topics</a>"#));

        tabs.relayout(TabLayout::new(Rect::new(4.0, 96.0), Rect::new(112.0, 80.5)));
        tabs.select(Tab::Topics);
        let html = tab_bar(&tabs);
        assert!(html.contains(r#"style="left: 112px; width: 80.5px""#));
    }
}
