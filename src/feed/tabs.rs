//! Two-tab selector state with a position indicator
//!
//! Exactly one tab is active. The indicator mirrors the active control's
//! layout box and is recomputed whenever the active tab or the layout
//! changes. Layout changes arrive through a [`Viewport`]; a
//! [`ResizeSubscription`] stops listening when dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Which list the feed shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Thoughts,
    Topics,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Thoughts, Tab::Topics];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Thoughts => "thoughts",
            Tab::Topics => "topics",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thoughts" => Ok(Tab::Thoughts),
            "topics" => Ok(Tab::Topics),
            other => Err(format!("Unknown tab: {}. Available: thoughts, topics", other)),
        }
    }
}

/// Horizontal layout box of a control, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub width: f64,
}

impl Rect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Measured boxes of both tab controls; `None` until measured
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TabLayout {
    pub thoughts: Option<Rect>,
    pub topics: Option<Rect>,
}

impl TabLayout {
    pub fn new(thoughts: Rect, topics: Rect) -> Self {
        Self {
            thoughts: Some(thoughts),
            topics: Some(topics),
        }
    }

    pub fn get(&self, tab: Tab) -> Option<Rect> {
        match tab {
            Tab::Thoughts => self.thoughts,
            Tab::Topics => self.topics,
        }
    }
}

/// Tab selector state
#[derive(Debug, Clone, Default)]
pub struct Tabs {
    active: Tab,
    layout: TabLayout,
    indicator: Option<Rect>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(tab: Tab) -> Self {
        let mut tabs = Self::new();
        tabs.select(tab);
        tabs
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Activate `tab`; returns whether the selection changed
    pub fn select(&mut self, tab: Tab) -> bool {
        let changed = self.active != tab;
        self.active = tab;
        self.recompute();
        changed
    }

    /// Apply freshly measured control boxes
    pub fn relayout(&mut self, layout: TabLayout) {
        self.layout = layout;
        self.recompute();
    }

    /// Box the indicator sits on; hidden until the active control is measured
    pub fn indicator(&self) -> Option<Rect> {
        self.indicator
    }

    pub fn subscribe(&self, viewport: &Viewport) -> ResizeSubscription {
        ResizeSubscription {
            rx: viewport.tx.subscribe(),
        }
    }

    fn recompute(&mut self) {
        self.indicator = self.layout.get(self.active);
    }
}

const VIEWPORT_CAPACITY: usize = 16;

/// Publishes layout changes to subscribed tab selectors
#[derive(Debug, Clone)]
pub struct Viewport {
    tx: broadcast::Sender<TabLayout>,
}

impl Viewport {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(VIEWPORT_CAPACITY);
        Self { tx }
    }

    /// Announce a new layout; returns how many listeners received it
    pub fn resize(&self, layout: TabLayout) -> usize {
        self.tx.send(layout).unwrap_or(0)
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Live resize listener; dropping it unsubscribes
#[derive(Debug)]
pub struct ResizeSubscription {
    rx: broadcast::Receiver<TabLayout>,
}

impl ResizeSubscription {
    /// Apply every pending layout to `tabs`; returns how many were applied
    pub fn apply(&mut self, tabs: &mut Tabs) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(layout) => {
                    tabs.relayout(layout);
                    applied += 1;
                }
                // Only the latest layout matters
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        applied
    }

    /// Wait for the next layout and apply it; `false` once the viewport is gone
    pub async fn next(&mut self, tabs: &mut Tabs) -> bool {
        loop {
            match self.rx.recv().await {
                Ok(layout) => {
                    tabs.relayout(layout);
                    return true;
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}
