//! Visibility watching for scroll-reveal elements

use std::rc::Rc;

use js_sys::Array;
use museum_page_app::{PageApp, PageEvent};
use museum_page_core::error::CoreResult;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::bind::dispatch;
use crate::dom::js_error;
use crate::page::{WebPage, REVEAL_KEY_ATTRIBUTE};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// `IntersectionObserver` reporting each watched element once
///
/// Dropping it disconnects the observer.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    /// Watch the elements with these keys.
    ///
    /// The first time an element intersects the viewport it is unobserved and
    /// `PageEvent::ElementVisible` is dispatched for it.
    pub fn watch(app: &Rc<PageApp>, keys: &[String]) -> CoreResult<Self> {
        let callback_app = Rc::clone(app);
        let callback: ObserverCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(key) = target.get_attribute(REVEAL_KEY_ATTRIBUTE) {
                        dispatch(&callback_app, PageEvent::ElementVisible { key }, None);
                    }
                }
            },
        );

        let config = app.config();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        init.set_root_margin(&config.reveal_root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| js_error("IntersectionObserver", &e))?;

        for key in keys {
            match WebPage::reveal_element(key) {
                Ok(el) => observer.observe(&el),
                Err(e) => log::debug!("Not watching {key}: {e}"),
            }
        }
        log::debug!("Watching {} reveal element(s)", keys.len());

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Keep watching for the lifetime of the page.
    pub fn forget(self) {
        // Leaks the callback and skips the disconnect in Drop.
        std::mem::forget(self);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
