//! `Page` implementation over the live document

use std::time::Duration;

use gloo::utils::{document, window};
use museum_page_core::error::{CoreError, CoreResult};
use museum_page_core::types::{
    Dialog, FieldDescriptor, FieldKind, Notification, RevealTarget, ScrollBehavior, Section,
};
use museum_page_core::Page;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollToOptions,
};

use crate::dom::{
    element, html_element, js_error, query_all, query_document, set_display, set_style,
    toggle_class,
};

const SECTION_SELECTOR: &str = "section[id]";
const NAV_LINK_SELECTOR: &str = ".navbar-nav .nav-link";
const NAVBAR_SELECTOR: &str = ".navbar";
const FIELD_SELECTOR: &str = "input, textarea";
const INVALID_CLASS: &str = "is-invalid";
const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";
const DIALOG_OPEN_CLASS: &str = "show";
const NAVBAR_SCROLLED_BACKGROUND: &str = "rgba(33, 37, 41, 0.95)";
const NAVBAR_TOP_BACKGROUND: &str = "rgba(33, 37, 41, 0.8)";

const REVEAL_SELECTOR: &str =
    ".card, .collection-card, .event-card, .info-card, .membership-card, .exhibit-feature";
/// Attribute carrying the key of a reveal element
pub(crate) const REVEAL_KEY_ATTRIBUTE: &str = "data-reveal-key";
const ROW_SELECTOR: &str = ".row";
const CARD_CLASS: &str = "card";
const ANIMATE_IN_CLASS: &str = "animate-in";

/// Browser page
///
/// Stateless: every call looks the elements up again, so markup changes made by other
/// scripts are picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPage;

impl WebPage {
    fn form(form_id: &str) -> CoreResult<Element> {
        element(form_id)
    }

    fn submit_button(form_id: &str) -> CoreResult<HtmlButtonElement> {
        Self::form(form_id)?
            .query_selector("button[type=\"submit\"]")
            .map_err(|e| js_error(form_id, &e))?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            .ok_or_else(|| CoreError::ElementNotFound(format!("{form_id} submit control")))
    }

    fn field(field_id: &str) -> CoreResult<Element> {
        document()
            .get_element_by_id(field_id)
            .ok_or_else(|| CoreError::FieldNotFound(field_id.to_string()))
    }

    /// Reveal element carrying `key`
    pub(crate) fn reveal_element(key: &str) -> CoreResult<Element> {
        let selector = format!("[{REVEAL_KEY_ATTRIBUTE}=\"{key}\"]");
        document()
            .query_selector(&selector)
            .map_err(|e| js_error(&selector, &e))?
            .ok_or_else(|| CoreError::ElementNotFound(key.to_string()))
    }

    /// Position of a card among the cards of its innermost row
    fn row_position(el: &Element) -> Option<usize> {
        if !el.class_list().contains(CARD_CLASS) {
            return None;
        }
        let row = el.closest(ROW_SELECTOR).ok()??;
        query_all(&row, &format!(".{CARD_CLASS}"))
            .ok()?
            .iter()
            .position(|card| card == el)
    }

    fn label_text(field_id: &str) -> Option<String> {
        document()
            .query_selector(&format!("label[for=\"{field_id}\"]"))
            .ok()
            .flatten()
            .and_then(|label| label.text_content())
    }

    fn describe_field(el: &Element) -> Option<FieldDescriptor> {
        let id = el.id();
        if id.is_empty() {
            return None;
        }

        let kind = if el.tag_name().eq_ignore_ascii_case("textarea") {
            FieldKind::Textarea
        } else {
            match el.get_attribute("type").as_deref() {
                Some("submit" | "button" | "reset" | "hidden") => return None,
                Some("email") => FieldKind::Email,
                _ => FieldKind::Text,
            }
        };

        let mut field = FieldDescriptor::new(id.clone(), kind);
        if let Some(name) = el.get_attribute("name").filter(|n| !n.is_empty()) {
            field.name = name;
        }
        field.required = el.has_attribute("required");
        field.label = Self::label_text(&id);
        field.placeholder = el.get_attribute("placeholder");
        Some(field)
    }
}

impl Page for WebPage {
    fn scroll_offset(&self) -> f64 {
        window().scroll_y().unwrap_or(0.0)
    }

    fn sections(&self) -> Vec<Section> {
        let Ok(elements) = query_document(SECTION_SELECTOR) else {
            return Vec::new();
        };
        elements
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| {
                Section::new(
                    el.id(),
                    f64::from(el.offset_top()),
                    f64::from(el.offset_height()),
                )
            })
            .collect()
    }

    fn element_top(&self, element_id: &str) -> Option<f64> {
        html_element(element_id)
            .ok()
            .map(|el| f64::from(el.offset_top()))
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        window().scroll_to_with_scroll_to_options(&options);
    }

    fn nav_link_hrefs(&self) -> Vec<String> {
        query_document(NAV_LINK_SELECTOR)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| link.get_attribute("href"))
            .collect()
    }

    fn set_nav_link_active(&self, href: &str, active: bool) {
        for link in query_document(NAV_LINK_SELECTOR).unwrap_or_default() {
            if link.get_attribute("href").as_deref() == Some(href) {
                if let Err(e) = toggle_class(&link, ACTIVE_CLASS, active) {
                    log::debug!("Failed to toggle nav link {href}: {e}");
                }
            }
        }
    }

    fn set_navbar_scrolled(&self, scrolled: bool) -> CoreResult<()> {
        let navbar = document()
            .query_selector(NAVBAR_SELECTOR)
            .map_err(|e| js_error(NAVBAR_SELECTOR, &e))?
            .ok_or_else(|| CoreError::ElementNotFound("navbar".to_string()))?;
        let background = if scrolled {
            NAVBAR_SCROLLED_BACKGROUND
        } else {
            NAVBAR_TOP_BACKGROUND
        };
        set_style(&navbar, "background-color", background)?;
        toggle_class(&navbar, SCROLLED_CLASS, scrolled)
    }

    fn reveal_targets(&self) -> Vec<RevealTarget> {
        query_document(REVEAL_SELECTOR)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, el)| {
                let key = match el.get_attribute(REVEAL_KEY_ATTRIBUTE) {
                    Some(key) => key,
                    None => {
                        let key = format!("reveal-{index}");
                        el.set_attribute(REVEAL_KEY_ATTRIBUTE, &key).ok()?;
                        key
                    }
                };
                let target = RevealTarget::new(key);
                Some(match Self::row_position(&el) {
                    Some(position) => target.in_row(position),
                    None => target,
                })
            })
            .collect()
    }

    fn prepare_reveal(&self, key: &str, delay: Duration) -> CoreResult<()> {
        let el = Self::reveal_element(key)?;
        set_style(&el, "opacity", "0")?;
        set_style(&el, "transform", "translateY(30px)")?;
        // The shorthand resets the delay, so it goes first.
        set_style(&el, "transition", "opacity 0.8s ease, transform 0.8s ease")?;
        set_style(
            &el,
            "transition-delay",
            &format!("{}s", delay.as_secs_f64()),
        )
    }

    fn reveal(&self, key: &str) -> CoreResult<()> {
        let el = Self::reveal_element(key)?;
        set_style(&el, "opacity", "1")?;
        set_style(&el, "transform", "translateY(0)")?;
        toggle_class(&el, ANIMATE_IN_CLASS, true)
    }

    fn form_fields(&self, form_id: &str) -> CoreResult<Vec<FieldDescriptor>> {
        let form = Self::form(form_id)?;
        Ok(query_all(&form, FIELD_SELECTOR)?
            .iter()
            .filter_map(Self::describe_field)
            .collect())
    }

    fn field_value(&self, field_id: &str) -> CoreResult<String> {
        let field = Self::field(field_id)?;
        if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        if let Some(textarea) = field.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(textarea.value());
        }
        Err(CoreError::FieldNotFound(field_id.to_string()))
    }

    fn reset_form(&self, form_id: &str) -> CoreResult<()> {
        Self::form(form_id)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| CoreError::ElementNotFound(form_id.to_string()))?
            .reset();
        Ok(())
    }

    fn set_field_invalid(&self, field_id: &str, invalid: bool) -> CoreResult<()> {
        toggle_class(&Self::field(field_id)?, INVALID_CLASS, invalid)
    }

    fn has_element(&self, element_id: &str) -> bool {
        document().get_element_by_id(element_id).is_some()
    }

    fn create_error_element(&self, field_id: &str, error_id: &str) -> CoreResult<()> {
        let field = Self::field(field_id)?;
        let parent = field
            .parent_node()
            .ok_or_else(|| CoreError::ElementNotFound(format!("parent of {field_id}")))?;

        let error = document()
            .create_element("div")
            .map_err(|e| js_error("create error element", &e))?;
        error.set_id(error_id);
        error.set_class_name("invalid-feedback d-block");
        set_display(&error, "none")?;
        parent
            .append_child(&error)
            .map_err(|e| js_error(error_id, &e))?;
        Ok(())
    }

    fn show_error_element(&self, error_id: &str, message: &str) -> CoreResult<()> {
        let error = element(error_id)?;
        error.set_text_content(Some(message));
        set_display(&error, "block")
    }

    fn hide_error_element(&self, error_id: &str) -> CoreResult<()> {
        set_display(&element(error_id)?, "none")
    }

    // Labels are markup so an icon inside the button survives a sending cycle.
    fn submit_label(&self, form_id: &str) -> CoreResult<String> {
        Ok(Self::submit_button(form_id)?.inner_html())
    }

    fn set_submit_control(&self, form_id: &str, label: &str, disabled: bool) -> CoreResult<()> {
        let button = Self::submit_button(form_id)?;
        button.set_inner_html(label);
        button.set_disabled(disabled);
        Ok(())
    }

    fn insert_notification(&self, form_id: &str, notification: &Notification) -> CoreResult<()> {
        let form = Self::form(form_id)?;
        let parent = form
            .parent_node()
            .ok_or_else(|| CoreError::ElementNotFound(format!("parent of {form_id}")))?;

        let doc = document();
        let alert = doc
            .create_element("div")
            .map_err(|e| js_error("create notification", &e))?;
        alert.set_id(&notification.id);
        alert.set_class_name(&format!(
            "alert {} alert-dismissible fade show",
            notification.kind.css_class()
        ));
        alert
            .set_attribute("role", "alert")
            .map_err(|e| js_error("role", &e))?;
        alert.set_text_content(Some(&notification.message));

        if notification.dismissible {
            let close = doc
                .create_element("button")
                .map_err(|e| js_error("create close button", &e))?;
            close.set_class_name("btn-close");
            for (name, value) in [
                ("type", "button"),
                ("data-bs-dismiss", "alert"),
                ("aria-label", "Close"),
            ] {
                close
                    .set_attribute(name, value)
                    .map_err(|e| js_error(name, &e))?;
            }
            alert
                .append_child(&close)
                .map_err(|e| js_error("close button", &e))?;
        }

        parent
            .insert_before(&alert, Some(&form))
            .map_err(|e| js_error(&notification.id, &e))?;
        Ok(())
    }

    fn remove_element(&self, element_id: &str) -> bool {
        match document().get_element_by_id(element_id) {
            Some(el) => {
                el.remove();
                true
            }
            None => false,
        }
    }

    fn open_dialog(&self, dialog: &Dialog) -> CoreResult<()> {
        let el = element(&dialog.id)?;
        if let Some(title) = el
            .query_selector(".modal-title")
            .map_err(|e| js_error(&dialog.id, &e))?
        {
            title.set_text_content(Some(&dialog.title));
        }
        toggle_class(&el, DIALOG_OPEN_CLASS, true)?;
        set_display(&el, "block")?;
        el.remove_attribute("aria-hidden")
            .map_err(|e| js_error("aria-hidden", &e))
    }

    fn close_dialog(&self, dialog_id: &str) -> bool {
        let Ok(el) = element(dialog_id) else {
            return false;
        };
        if !el.class_list().contains(DIALOG_OPEN_CLASS) {
            return false;
        }
        let closed = toggle_class(&el, DIALOG_OPEN_CLASS, false)
            .and_then(|()| set_display(&el, "none"))
            .and_then(|()| {
                el.set_attribute("aria-hidden", "true")
                    .map_err(|e| js_error("aria-hidden", &e))
            });
        if let Err(e) = closed {
            log::warn!("Failed to close dialog {dialog_id}: {e}");
        }
        true
    }
}
