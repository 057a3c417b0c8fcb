//! DOM event listeners feeding the page controller

use std::rc::Rc;

use futures::FutureExt;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{document, window};
use museum_page_app::{fault, EventOutcome, PageApp, PageEvent};
use museum_page_core::services::card_transform;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, ErrorEvent, Event, KeyboardEvent};

use crate::dom::{query_document, set_style};
use crate::reveal::RevealObserver;

const MEMBERSHIP_BUTTON_SELECTOR: &str = ".membership-card button";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const DIALOG_DISMISS_SELECTOR: &str = "[data-bs-dismiss=\"modal\"]";
const MEMBERSHIP_CARD_SELECTOR: &str = ".membership-card";
const FEATURED_CLASS: &str = "featured";

/// Listeners attached to the page
///
/// Dropping it detaches them.
#[must_use = "listeners are removed when Bindings is dropped"]
pub struct Bindings {
    listeners: Vec<EventListener>,
    reveal: Option<RevealObserver>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Keep the listeners for the lifetime of the page.
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
        if let Some(reveal) = self.reveal {
            reveal.forget();
        }
    }
}

/// Attach every listener the controller needs.
pub fn attach(app: &Rc<PageApp>) -> Bindings {
    let mut listeners = Vec::new();
    let window = window();
    let document = document();

    let scroll_app = Rc::clone(app);
    listeners.push(EventListener::new(&window, "scroll", move |event| {
        let event = PageEvent::Scroll {
            timestamp_ms: event.time_stamp(),
        };
        dispatch(&scroll_app, event, None);
    }));

    let click_app = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        &document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if let Some(page_event) = click_event(&click_app, event) {
                dispatch(&click_app, page_event, Some(event));
            }
        },
    ));

    let key_app = Rc::clone(app);
    listeners.push(EventListener::new(&document, "keydown", move |event| {
        if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
            let event = PageEvent::KeyDown {
                key: key_event.key(),
            };
            dispatch(&key_app, event, None);
        }
    }));

    listeners.push(EventListener::new(&window, "error", |event| {
        let message = event.dyn_ref::<ErrorEvent>().map_or_else(
            || "unknown error".to_string(),
            |e| format!("{} ({}:{})", e.message(), e.filename(), e.lineno()),
        );
        fault::report_uncaught("script error", &message);
    }));

    match document.get_element_by_id(&app.config().form_id) {
        Some(form) => attach_form(app, &form, &mut listeners),
        None => log::debug!("No form #{} on this page", app.config().form_id),
    }

    attach_membership_cards(&mut listeners);
    let reveal = watch_reveal(app);

    log::debug!("Attached {} page listeners", listeners.len());
    Bindings { listeners, reveal }
}

/// Hide the reveal elements and watch them; shows them all at once when watching fails.
fn watch_reveal(app: &Rc<PageApp>) -> Option<RevealObserver> {
    let keys = app.prepare_effects();
    if keys.is_empty() {
        return None;
    }
    match RevealObserver::watch(app, &keys) {
        Ok(observer) => Some(observer),
        Err(e) => {
            fault::report("Scroll reveal unavailable", &e);
            for key in keys {
                dispatch(app, PageEvent::ElementVisible { key }, None);
            }
            None
        }
    }
}

/// Hover lift of the membership cards
fn attach_membership_cards(listeners: &mut Vec<EventListener>) {
    for card in query_document(MEMBERSHIP_CARD_SELECTOR).unwrap_or_default() {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = card.clone();
            listeners.push(EventListener::new(&card, event, move |_| {
                let featured = target.class_list().contains(FEATURED_CLASS);
                let transform = card_transform(featured, hovered);
                if let Err(e) = set_style(&target, "transform", transform) {
                    log::debug!("Failed to lift membership card: {e}");
                }
            }));
        }
    }
}

fn attach_form(app: &Rc<PageApp>, form: &Element, listeners: &mut Vec<EventListener>) {
    let submit_app = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            // Decided before the submission finishes.
            event.prevent_default();
            dispatch(&submit_app, PageEvent::FormSubmit, None);
        },
    ));

    // blur does not bubble; focusout does.
    let blur_app = Rc::clone(app);
    listeners.push(EventListener::new(form, "focusout", move |event| {
        if let Some(field_id) = field_target(event) {
            dispatch(&blur_app, PageEvent::FieldBlur { field_id }, None);
        }
    }));

    let input_app = Rc::clone(app);
    listeners.push(EventListener::new(form, "input", move |event| {
        if let Some(field_id) = field_target(event) {
            dispatch(&input_app, PageEvent::FieldInput { field_id }, None);
        }
    }));
}

/// Translate a click into a page event, if it targets something the controller handles
fn click_event(app: &PageApp, event: &Event) -> Option<PageEvent> {
    let target = event.target()?.dyn_into::<Element>().ok()?;

    if let Ok(Some(button)) = target.closest(MEMBERSHIP_BUTTON_SELECTOR) {
        return Some(PageEvent::MembershipChosen {
            label: button.text_content().unwrap_or_default(),
        });
    }

    if let Ok(Some(dismiss)) = target.closest(DIALOG_DISMISS_SELECTOR) {
        let dialog_id = &app.config().membership_dialog_id;
        let in_dialog = dismiss
            .closest(&format!("#{dialog_id}"))
            .ok()
            .flatten()
            .is_some();
        if in_dialog {
            return Some(PageEvent::DialogDismissed);
        }
    }

    let anchor = target.closest(ANCHOR_SELECTOR).ok().flatten()?;
    Some(PageEvent::AnchorClick {
        href: anchor.get_attribute("href")?,
    })
}

/// Id of the required input/textarea an event came from
fn field_target(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let tag = target.tag_name();
    let is_field = tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea");
    (is_field && target.has_attribute("required") && !target.id().is_empty())
        .then(|| target.id())
}

/// Run the handler and apply its outcome.
///
/// Handlers that complete without waiting apply `preventDefault` synchronously; the rest
/// (submission) continue on the local executor.
pub(crate) fn dispatch(app: &Rc<PageApp>, event: PageEvent, dom_event: Option<&Event>) {
    let mut task = Box::pin(run(Rc::clone(app), event));
    match (&mut task).now_or_never() {
        Some(outcome) => {
            if outcome.prevent_default {
                if let Some(dom_event) = dom_event {
                    dom_event.prevent_default();
                }
            }
        }
        None => spawn_local(async move {
            task.await;
        }),
    }
}

async fn run(app: Rc<PageApp>, event: PageEvent) -> EventOutcome {
    let outcome = app.handle(event).await;
    if let Some(follow_up) = outcome.follow_up.clone() {
        let app = Rc::clone(&app);
        spawn_local(async move {
            app.run_follow_up(follow_up).await;
        });
    }
    outcome
}
