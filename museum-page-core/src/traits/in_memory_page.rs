//! In-memory page implementation

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::Page;
use crate::types::{
    Dialog, FieldDescriptor, NavLink, NavLinkState, Notification, RevealTarget, ScrollBehavior,
    Section,
};

/// Snapshot of an error element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorElement {
    pub field_id: String,
    pub message: String,
    pub visible: bool,
}

/// Snapshot of a reveal element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealElement {
    pub target: RevealTarget,
    /// Transition delay set when it was hidden; `None` until prepared
    pub delay: Option<Duration>,
    /// Number of times it was revealed
    pub reveal_count: usize,
}

impl RevealElement {
    pub fn is_hidden(&self) -> bool {
        self.delay.is_some() && self.reveal_count == 0
    }
}

/// Snapshot of a submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

#[derive(Default)]
struct FormNode {
    fields: Vec<FieldDescriptor>,
    submit: Option<SubmitControl>,
    /// Notifications inserted before the form, oldest first
    notifications: Vec<Notification>,
}

#[derive(Default)]
struct DialogNode {
    title: String,
    open: bool,
}

#[derive(Default)]
struct PageState {
    scroll_offset: f64,
    sections: Vec<Section>,
    /// Tops of non-section elements
    element_tops: HashMap<String, f64>,
    nav_links: Vec<NavLink>,
    navbar_scrolled: Option<bool>,
    forms: HashMap<String, FormNode>,
    values: HashMap<String, String>,
    invalid_fields: HashSet<String>,
    /// Insertion order is kept to detect duplicates
    error_elements: Vec<(String, ErrorElement)>,
    dialogs: HashMap<String, DialogNode>,
    reveal_elements: Vec<RevealElement>,
    scroll_requests: Vec<(f64, ScrollBehavior)>,
}

impl PageState {
    fn field(&self, field_id: &str) -> Option<&FieldDescriptor> {
        self.forms
            .values()
            .flat_map(|form| form.fields.iter())
            .find(|f| f.id == field_id)
    }

    fn error_element_mut(&mut self, error_id: &str) -> CoreResult<&mut ErrorElement> {
        self.error_elements
            .iter_mut()
            .find(|(id, _)| id == error_id)
            .map(|(_, el)| el)
            .ok_or_else(|| CoreError::ElementNotFound(error_id.to_string()))
    }

    fn reveal_element_mut(&mut self, key: &str) -> CoreResult<&mut RevealElement> {
        self.reveal_elements
            .iter_mut()
            .find(|el| el.target.key == key)
            .ok_or_else(|| CoreError::ElementNotFound(key.to_string()))
    }

    fn form_mut(&mut self, form_id: &str) -> CoreResult<&mut FormNode> {
        self.forms
            .get_mut(form_id)
            .ok_or_else(|| CoreError::ElementNotFound(form_id.to_string()))
    }
}

/// In-memory page
///
/// Default implementation for tests and headless use, available on all platforms.
/// Built with the `with_*` methods, inspected with the accessor methods.
#[derive(Clone, Default)]
pub struct InMemoryPage {
    state: Arc<RwLock<PageState>>,
}

impl InMemoryPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Builders ===

    #[must_use]
    pub fn with_section(self, id: &str, top: f64, height: f64) -> Self {
        self.state.write().sections.push(Section::new(id, top, height));
        self
    }

    /// Add a navigation link targeting `href` (usually `#<section-id>`)
    #[must_use]
    pub fn with_nav_link(self, href: &str) -> Self {
        self.state.write().nav_links.push(NavLink {
            href: href.to_string(),
            state: NavLinkState::Inactive,
        });
        self
    }

    #[must_use]
    pub fn with_navbar(self) -> Self {
        self.state.write().navbar_scrolled = Some(false);
        self
    }

    /// Add a plain element (not a section) at a document offset
    #[must_use]
    pub fn with_element(self, id: &str, top: f64) -> Self {
        self.state.write().element_tops.insert(id.to_string(), top);
        self
    }

    /// Add a form with a submit control labelled `submit_label`
    #[must_use]
    pub fn with_form(self, form_id: &str, submit_label: &str) -> Self {
        self.state.write().forms.insert(
            form_id.to_string(),
            FormNode {
                submit: Some(SubmitControl {
                    label: submit_label.to_string(),
                    disabled: false,
                }),
                ..FormNode::default()
            },
        );
        self
    }

    /// Add a field to an existing form
    #[must_use]
    pub fn with_field(self, form_id: &str, field: FieldDescriptor) -> Self {
        {
            let mut state = self.state.write();
            state.values.insert(field.id.clone(), String::new());
            state
                .forms
                .entry(form_id.to_string())
                .or_default()
                .fields
                .push(field);
        }
        self
    }

    #[must_use]
    pub fn with_dialog(self, dialog_id: &str) -> Self {
        self.state
            .write()
            .dialogs
            .insert(dialog_id.to_string(), DialogNode::default());
        self
    }

    /// Add an element that fades in on first view
    #[must_use]
    pub fn with_reveal_target(self, target: RevealTarget) -> Self {
        self.state.write().reveal_elements.push(RevealElement {
            target,
            delay: None,
            reveal_count: 0,
        });
        self
    }

    // === User simulation ===

    pub fn set_scroll_offset(&self, offset: f64) {
        self.state.write().scroll_offset = offset;
    }

    /// Type a value into a field, replacing its content
    pub fn set_field_value(&self, field_id: &str, value: &str) {
        self.state
            .write()
            .values
            .insert(field_id.to_string(), value.to_string());
    }

    // === Inspection ===

    pub fn nav_links(&self) -> Vec<NavLink> {
        self.state.read().nav_links.clone()
    }

    /// Hrefs of the links currently marked active
    pub fn active_nav_links(&self) -> Vec<String> {
        self.state
            .read()
            .nav_links
            .iter()
            .filter(|l| l.is_active())
            .map(|l| l.href.clone())
            .collect()
    }

    pub fn navbar_scrolled(&self) -> Option<bool> {
        self.state.read().navbar_scrolled
    }

    pub fn is_field_invalid(&self, field_id: &str) -> bool {
        self.state.read().invalid_fields.contains(field_id)
    }

    pub fn error_element(&self, error_id: &str) -> Option<ErrorElement> {
        self.state
            .read()
            .error_elements
            .iter()
            .find(|(id, _)| id == error_id)
            .map(|(_, el)| el.clone())
    }

    /// Number of error elements with this id (more than one means a duplicate was created)
    pub fn error_element_count(&self, error_id: &str) -> usize {
        self.state
            .read()
            .error_elements
            .iter()
            .filter(|(id, _)| id == error_id)
            .count()
    }

    pub fn submit_control(&self, form_id: &str) -> Option<SubmitControl> {
        self.state
            .read()
            .forms
            .get(form_id)
            .and_then(|f| f.submit.clone())
    }

    pub fn notifications(&self, form_id: &str) -> Vec<Notification> {
        self.state
            .read()
            .forms
            .get(form_id)
            .map(|f| f.notifications.clone())
            .unwrap_or_default()
    }

    pub fn is_dialog_open(&self, dialog_id: &str) -> bool {
        self.state
            .read()
            .dialogs
            .get(dialog_id)
            .is_some_and(|d| d.open)
    }

    pub fn dialog_title(&self, dialog_id: &str) -> Option<String> {
        self.state
            .read()
            .dialogs
            .get(dialog_id)
            .map(|d| d.title.clone())
    }

    pub fn reveal_element(&self, key: &str) -> Option<RevealElement> {
        self.state
            .read()
            .reveal_elements
            .iter()
            .find(|el| el.target.key == key)
            .cloned()
    }

    /// Every `scroll_to` call, oldest first
    pub fn scroll_requests(&self) -> Vec<(f64, ScrollBehavior)> {
        self.state.read().scroll_requests.clone()
    }
}

impl Page for InMemoryPage {
    fn scroll_offset(&self) -> f64 {
        self.state.read().scroll_offset
    }

    fn sections(&self) -> Vec<Section> {
        self.state.read().sections.clone()
    }

    fn element_top(&self, element_id: &str) -> Option<f64> {
        let state = self.state.read();
        state
            .sections
            .iter()
            .find(|s| s.id == element_id)
            .map(|s| s.top)
            .or_else(|| state.element_tops.get(element_id).copied())
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut state = self.state.write();
        state.scroll_offset = top.max(0.0);
        state.scroll_requests.push((top, behavior));
    }

    fn nav_link_hrefs(&self) -> Vec<String> {
        self.state
            .read()
            .nav_links
            .iter()
            .map(|l| l.href.clone())
            .collect()
    }

    fn set_nav_link_active(&self, href: &str, active: bool) {
        let state = if active {
            NavLinkState::Active
        } else {
            NavLinkState::Inactive
        };
        for link in self
            .state
            .write()
            .nav_links
            .iter_mut()
            .filter(|l| l.href == href)
        {
            link.state = state;
        }
    }

    fn set_navbar_scrolled(&self, scrolled: bool) -> CoreResult<()> {
        let mut state = self.state.write();
        match state.navbar_scrolled.as_mut() {
            Some(current) => {
                *current = scrolled;
                Ok(())
            }
            None => Err(CoreError::ElementNotFound("navbar".to_string())),
        }
    }

    fn reveal_targets(&self) -> Vec<RevealTarget> {
        self.state
            .read()
            .reveal_elements
            .iter()
            .map(|el| el.target.clone())
            .collect()
    }

    fn prepare_reveal(&self, key: &str, delay: Duration) -> CoreResult<()> {
        self.state.write().reveal_element_mut(key)?.delay = Some(delay);
        Ok(())
    }

    fn reveal(&self, key: &str) -> CoreResult<()> {
        self.state.write().reveal_element_mut(key)?.reveal_count += 1;
        Ok(())
    }

    fn form_fields(&self, form_id: &str) -> CoreResult<Vec<FieldDescriptor>> {
        self.state
            .read()
            .forms
            .get(form_id)
            .map(|f| f.fields.clone())
            .ok_or_else(|| CoreError::ElementNotFound(form_id.to_string()))
    }

    fn field_value(&self, field_id: &str) -> CoreResult<String> {
        self.state
            .read()
            .values
            .get(field_id)
            .cloned()
            .ok_or_else(|| CoreError::FieldNotFound(field_id.to_string()))
    }

    fn reset_form(&self, form_id: &str) -> CoreResult<()> {
        let mut state = self.state.write();
        let field_ids: Vec<String> = state
            .forms
            .get(form_id)
            .ok_or_else(|| CoreError::ElementNotFound(form_id.to_string()))?
            .fields
            .iter()
            .map(|f| f.id.clone())
            .collect();
        for id in field_ids {
            state.values.insert(id, String::new());
        }
        Ok(())
    }

    fn set_field_invalid(&self, field_id: &str, invalid: bool) -> CoreResult<()> {
        let mut state = self.state.write();
        if state.field(field_id).is_none() {
            return Err(CoreError::FieldNotFound(field_id.to_string()));
        }
        if invalid {
            state.invalid_fields.insert(field_id.to_string());
        } else {
            state.invalid_fields.remove(field_id);
        }
        Ok(())
    }

    fn has_element(&self, element_id: &str) -> bool {
        let state = self.state.read();
        state.sections.iter().any(|s| s.id == element_id)
            || state.element_tops.contains_key(element_id)
            || state.forms.contains_key(element_id)
            || state.dialogs.contains_key(element_id)
            || state.field(element_id).is_some()
            || state.error_elements.iter().any(|(id, _)| id == element_id)
            || state
                .forms
                .values()
                .flat_map(|f| f.notifications.iter())
                .any(|n| n.id == element_id)
    }

    fn create_error_element(&self, field_id: &str, error_id: &str) -> CoreResult<()> {
        let mut state = self.state.write();
        if state.field(field_id).is_none() {
            return Err(CoreError::FieldNotFound(field_id.to_string()));
        }
        state.error_elements.push((
            error_id.to_string(),
            ErrorElement {
                field_id: field_id.to_string(),
                message: String::new(),
                visible: false,
            },
        ));
        Ok(())
    }

    fn show_error_element(&self, error_id: &str, message: &str) -> CoreResult<()> {
        let mut state = self.state.write();
        let element = state.error_element_mut(error_id)?;
        element.message = message.to_string();
        element.visible = true;
        Ok(())
    }

    fn hide_error_element(&self, error_id: &str) -> CoreResult<()> {
        self.state.write().error_element_mut(error_id)?.visible = false;
        Ok(())
    }

    fn submit_label(&self, form_id: &str) -> CoreResult<String> {
        self.state
            .read()
            .forms
            .get(form_id)
            .and_then(|f| f.submit.as_ref())
            .map(|s| s.label.clone())
            .ok_or_else(|| CoreError::ElementNotFound(format!("{form_id} submit control")))
    }

    fn set_submit_control(&self, form_id: &str, label: &str, disabled: bool) -> CoreResult<()> {
        let mut state = self.state.write();
        let submit = state
            .form_mut(form_id)?
            .submit
            .as_mut()
            .ok_or_else(|| CoreError::ElementNotFound(format!("{form_id} submit control")))?;
        submit.label = label.to_string();
        submit.disabled = disabled;
        Ok(())
    }

    fn insert_notification(&self, form_id: &str, notification: &Notification) -> CoreResult<()> {
        self.state
            .write()
            .form_mut(form_id)?
            .notifications
            .push(notification.clone());
        Ok(())
    }

    fn remove_element(&self, element_id: &str) -> bool {
        let mut state = self.state.write();
        for form in state.forms.values_mut() {
            if let Some(pos) = form.notifications.iter().position(|n| n.id == element_id) {
                form.notifications.remove(pos);
                return true;
            }
        }
        let before = state.error_elements.len();
        state.error_elements.retain(|(id, _)| id != element_id);
        before != state.error_elements.len()
    }

    fn open_dialog(&self, dialog: &Dialog) -> CoreResult<()> {
        let mut state = self.state.write();
        let node = state
            .dialogs
            .get_mut(&dialog.id)
            .ok_or_else(|| CoreError::ElementNotFound(dialog.id.clone()))?;
        node.title.clone_from(&dialog.title);
        node.open = true;
        Ok(())
    }

    fn close_dialog(&self, dialog_id: &str) -> bool {
        match self.state.write().dialogs.get_mut(dialog_id) {
            Some(node) if node.open => {
                node.open = false;
                true
            }
            _ => false,
        }
    }
}
