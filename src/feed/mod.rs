//! Feed module - the posts/topics tab selector and its lists

mod cards;
pub mod tabs;

pub use cards::{blog_card, tab_bar, topic_card, Feed};
pub use tabs::{Rect, ResizeSubscription, Tab, TabLayout, Tabs, Viewport};
