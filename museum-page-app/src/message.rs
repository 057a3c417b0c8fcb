//! Page events and handler outcomes
//!
//! The browser adapter translates DOM events into [`PageEvent`]s; [`PageApp::handle`]
//! consumes them and answers with an [`EventOutcome`].
//!
//! [`PageApp::handle`]: crate::PageApp::handle

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Every page event the controller reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PageEvent {
    /// Window scrolled
    Scroll { timestamp_ms: f64 },
    /// Click on a link whose href starts with `#`
    AnchorClick { href: String },
    /// A form field lost focus
    FieldBlur { field_id: String },
    /// A form field's value changed
    FieldInput { field_id: String },
    /// The contact form was submitted
    FormSubmit,
    /// Click on a membership button
    MembershipChosen { label: String },
    /// Dismiss action of the membership dialog
    DialogDismissed,
    KeyDown { key: String },
    /// A notification's display time ran out
    NotificationExpired { id: String },
    /// A reveal element scrolled into view
    ElementVisible { key: String },
}

impl PageEvent {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::AnchorClick { .. } => "anchor-click",
            Self::FieldBlur { .. } => "field-blur",
            Self::FieldInput { .. } => "field-input",
            Self::FormSubmit => "form-submit",
            Self::MembershipChosen { .. } => "membership-chosen",
            Self::DialogDismissed => "dialog-dismissed",
            Self::KeyDown { .. } => "keydown",
            Self::NotificationExpired { .. } => "notification-expired",
            Self::ElementVisible { .. } => "element-visible",
        }
    }
}

/// Work the adapter schedules after a handler returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FollowUp {
    /// Feed `NotificationExpired { id }` back after `after`
    ExpireNotification { id: String, after: Duration },
}

/// What the adapter must do with the DOM event once the handler returns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the DOM event
    pub prevent_default: bool,
    pub follow_up: Option<FollowUp>,
}

impl EventOutcome {
    /// Let the browser proceed
    #[must_use]
    pub fn proceed() -> Self {
        Self::default()
    }

    /// The handler took over the event
    #[must_use]
    pub fn prevented() -> Self {
        Self {
            prevent_default: true,
            follow_up: None,
        }
    }

    #[must_use]
    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}
