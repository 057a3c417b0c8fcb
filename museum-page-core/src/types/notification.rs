//! 通知与弹窗类型定义

use serde::{Deserialize, Serialize};

/// Visual kind of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Alert class used by the site stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
        }
    }
}

/// A dismissible alert inserted before a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Element id, unique per notification
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub dismissible: bool,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: format!("notification-{}", uuid::Uuid::new_v4().simple()),
            kind,
            message: message.into(),
            dismissible: true,
        }
    }
}

/// Content of a modal dialog whose markup already exists in the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    /// Element id of the dialog
    pub id: String,
    pub title: String,
}
