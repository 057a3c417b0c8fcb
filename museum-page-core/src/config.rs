//! Page configuration
//!
//! Every field has a default matching the live site, so an empty JSON object is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Page behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// Added to the scroll offset before matching it against section ranges
    pub scroll_probe_offset: f64,
    /// Height of the fixed header, subtracted from anchor scroll targets
    pub header_offset: f64,
    /// Scroll offset past which the navbar gets the `scrolled` class
    pub navbar_scrolled_threshold: f64,
    /// Minimum interval between two processed scroll events; `None` processes every event
    pub scroll_throttle_ms: Option<u64>,
    /// Id of the contact form
    pub form_id: String,
    /// Delay of the simulated submission
    pub submission_delay_ms: u64,
    /// Lifetime of a notification before it is removed automatically
    pub notification_ttl_ms: u64,
    /// Submit control label while a submission is in flight
    pub sending_label: String,
    /// Text of the success notification
    pub success_message: String,
    /// Text of the failure notification
    pub failure_message: String,
    /// Id of the membership dialog element
    pub membership_dialog_id: String,
    /// Extra transition delay per card before it in the same row
    pub reveal_stagger_ms: u64,
    /// Visible fraction of an element that triggers its reveal (0 to 1)
    pub reveal_threshold: f64,
    /// Margin applied to the viewport when detecting visibility, in CSS margin syntax
    pub reveal_root_margin: String,
    /// `log` level filter name (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_probe_offset: 100.0,
            header_offset: 80.0,
            navbar_scrolled_threshold: 50.0,
            scroll_throttle_ms: None,
            form_id: "contactForm".to_string(),
            submission_delay_ms: 2000,
            notification_ttl_ms: 5000,
            sending_label: "Sending...".to_string(),
            success_message:
                "Thank you for your message! We will get back to you within 2 business days."
                    .to_string(),
            failure_message: "Sorry, your message could not be sent. Please try again."
                .to_string(),
            membership_dialog_id: "membershipModal".to_string(),
            reveal_stagger_ms: 100,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and required identifiers.
    pub fn validate(&self) -> CoreResult<()> {
        let offsets = [
            ("scrollProbeOffset", self.scroll_probe_offset),
            ("headerOffset", self.header_offset),
            ("navbarScrolledThreshold", self.navbar_scrolled_threshold),
        ];
        for (name, value) in offsets {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::ConfigError(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.form_id.trim().is_empty() {
            return Err(CoreError::ConfigError("formId cannot be empty".to_string()));
        }
        if self.membership_dialog_id.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "membershipDialogId cannot be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(CoreError::ConfigError(format!(
                "revealThreshold must be between 0 and 1, got {}",
                self.reveal_threshold
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(CoreError::ConfigError(format!(
                "Unknown log level: '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    /// Parsed log level, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
