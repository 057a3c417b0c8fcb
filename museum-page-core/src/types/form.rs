//! 表单相关类型定义

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
}

/// Static description of a form field, as read from the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Element id
    pub id: String,
    /// Submission key (`name` attribute, falls back to the id)
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Text of the associated `label[for]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            required: false,
            label: None,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Human readable name used in messages.
    ///
    /// Label text without the required-marker `*`, then the placeholder, then `"Field"`.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.replace('*', "").trim().to_string();
        }
        match &self.placeholder {
            Some(placeholder) if !placeholder.is_empty() => placeholder.clone(),
            _ => "Field".to_string(),
        }
    }

    /// Id of the error element shown next to this field.
    pub fn error_element_id(&self) -> String {
        error_element_id(&self.id)
    }
}

/// Deterministic id of the error element attached to `field_id`.
pub fn error_element_id(field_id: &str) -> String {
    format!("{field_id}-error")
}

/// Validity state of a single field
///
/// The error message exists exactly when the field is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FieldValidity {
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

impl FieldValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// One failed field of a form validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Aggregate result of validating every required field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidation {
    /// Errors in document order
    pub errors: Vec<FieldError>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field_id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field_id == field_id)
            .map(|e| e.message.as_str())
    }
}

/// Submission state of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormSubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

impl fmt::Display for FormSubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
        };
        f.write_str(name)
    }
}

/// Collected values of a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub form_id: String,
    pub fields: BTreeMap<String, String>,
}

impl ContactSubmission {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Acknowledgement returned by a submission gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Gateway-assigned reference
    pub reference: String,
    #[serde(rename = "acceptedAt")]
    #[serde(with = "crate::utils::datetime")]
    pub accepted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Receipt with a fresh random reference, accepted now.
    pub fn issue() -> Self {
        Self {
            reference: uuid::Uuid::new_v4().to_string(),
            accepted_at: Utc::now(),
        }
    }
}
