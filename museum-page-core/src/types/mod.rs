//! 类型定义模块

mod effects;
mod form;
mod navigation;
mod notification;

pub use effects::RevealTarget;
pub use form::{
    error_element_id, ContactSubmission, FieldDescriptor, FieldError, FieldKind, FieldValidity,
    FormSubmissionState, FormValidation, SubmissionReceipt,
};
pub use navigation::{NavLink, NavLinkState, ScrollBehavior, Section};
pub use notification::{Dialog, Notification, NotificationKind};
