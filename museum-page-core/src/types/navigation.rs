//! 导航相关类型定义

use serde::{Deserialize, Serialize};

/// A named, vertically bounded region of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Element id (without `#`)
    pub id: String,
    /// Document-relative top offset
    pub top: f64,
    /// Rendered height
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `position` falls in `[top, top + height)`.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }

    /// The href a navigation link uses to target this section.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Display state of a navigation link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavLinkState {
    Active,
    Inactive,
}

/// A navigation link bound to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// `#<section-id>`
    pub href: String,
    pub state: NavLinkState,
}

impl NavLink {
    pub fn is_active(&self) -> bool {
        self.state == NavLinkState::Active
    }
}

/// Scroll behavior passed to the page when moving the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}
