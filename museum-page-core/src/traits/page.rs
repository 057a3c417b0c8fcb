//! Page access abstract Trait

use std::time::Duration;

use crate::error::CoreResult;
use crate::types::{
    Dialog, FieldDescriptor, Notification, RevealTarget, ScrollBehavior, Section,
};

/// Page capability Trait
///
/// Everything the page behavior reads from or writes to the document goes through here.
///
/// Platform implementation:
/// - Browser: `WebPage` (`museum-page-web`, `web-sys`)
/// - Tests / headless: [`InMemoryPage`](super::InMemoryPage)
///
/// Methods addressing an element that does not exist return
/// `CoreError::ElementNotFound` (or `FieldNotFound` for form fields).
pub trait Page: Send + Sync {
    // === Layout & scrolling ===

    /// Current vertical scroll offset of the viewport
    fn scroll_offset(&self) -> f64;

    /// All sections carrying an id, in document order
    fn sections(&self) -> Vec<Section>;

    /// Document-relative top offset of an element
    ///
    /// # Arguments
    /// * `element_id` - Element id (without `#`)
    fn element_top(&self, element_id: &str) -> Option<f64>;

    /// Move the viewport
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    // === Navigation ===

    /// Hrefs of every navigation link, in document order
    fn nav_link_hrefs(&self) -> Vec<String>;

    /// Toggle the `active` class on every navigation link with this href
    fn set_nav_link_active(&self, href: &str, active: bool);

    /// Toggle the `scrolled` styling of the navbar
    fn set_navbar_scrolled(&self, scrolled: bool) -> CoreResult<()>;

    // === Visual effects ===

    /// Elements that fade in on first view, in document order
    fn reveal_targets(&self) -> Vec<RevealTarget>;

    /// Hide an element until it is revealed
    ///
    /// # Arguments
    /// * `key` - Key from [`reveal_targets`](Self::reveal_targets)
    /// * `delay` - Transition delay applied when it is revealed
    fn prepare_reveal(&self, key: &str, delay: Duration) -> CoreResult<()>;

    /// Show a prepared element and mark it `animate-in`
    fn reveal(&self, key: &str) -> CoreResult<()>;

    // === Forms ===

    /// Descriptors of every input/textarea of a form, in document order
    fn form_fields(&self, form_id: &str) -> CoreResult<Vec<FieldDescriptor>>;

    /// Current raw value of a field
    fn field_value(&self, field_id: &str) -> CoreResult<String>;

    /// Restore every field of the form to its initial (empty) value
    fn reset_form(&self, form_id: &str) -> CoreResult<()>;

    /// Toggle the `is-invalid` marker of a field
    fn set_field_invalid(&self, field_id: &str, invalid: bool) -> CoreResult<()>;

    /// Whether an element with this id exists
    fn has_element(&self, element_id: &str) -> bool;

    /// Append a hidden, empty error element next to a field
    ///
    /// # Arguments
    /// * `field_id` - Field the error belongs to
    /// * `error_id` - Id to give the new element
    fn create_error_element(&self, field_id: &str, error_id: &str) -> CoreResult<()>;

    /// Set the text of an error element and make it visible
    fn show_error_element(&self, error_id: &str, message: &str) -> CoreResult<()>;

    /// Hide an error element, keeping it in the document
    fn hide_error_element(&self, error_id: &str) -> CoreResult<()>;

    /// Current label of the form's submit control
    ///
    /// The label is the control's content as the page stores it (markup in a browser), so
    /// writing it back with [`set_submit_control`](Self::set_submit_control) restores it
    /// exactly.
    fn submit_label(&self, form_id: &str) -> CoreResult<String>;

    /// Set label and disabled state of the form's submit control
    fn set_submit_control(&self, form_id: &str, label: &str, disabled: bool) -> CoreResult<()>;

    // === Notifications ===

    /// Insert a notification right before the form
    fn insert_notification(&self, form_id: &str, notification: &Notification) -> CoreResult<()>;

    /// Remove an element; returns whether it was present
    fn remove_element(&self, element_id: &str) -> bool;

    // === Dialogs ===

    /// Set the dialog title and show it
    fn open_dialog(&self, dialog: &Dialog) -> CoreResult<()>;

    /// Hide a dialog; returns whether it was open
    fn close_dialog(&self, dialog_id: &str) -> bool;
}
