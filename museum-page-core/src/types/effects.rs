//! 视觉效果相关类型定义

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An element that fades in when it first scrolls into view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealTarget {
    /// Page-assigned key identifying the element
    pub key: String,
    /// Position among the cards of its row, if it is a card inside a row
    pub row_position: Option<usize>,
}

impl RevealTarget {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            row_position: None,
        }
    }

    #[must_use]
    pub fn in_row(mut self, position: usize) -> Self {
        self.row_position = Some(position);
        self
    }

    /// Transition delay for this element: one `step` per card before it in its row.
    pub fn stagger_delay(&self, step: Duration) -> Duration {
        self.row_position.map_or(Duration::ZERO, |position| {
            step.saturating_mul(u32::try_from(position).unwrap_or(u32::MAX))
        })
    }
}
