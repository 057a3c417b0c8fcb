//! Browser binding of the museum page behavior.
//!
//! Implements the core platform traits with `web-sys` and `gloo`, installs a console logger
//! and a panic hook, and wires DOM events into [`PageApp`].
//!
//! Loaded as a wasm module; [`start`] runs automatically once the module is instantiated.

mod bind;
mod dom;
pub mod logger;
mod page;
mod reveal;
mod timer;

use std::rc::Rc;
use std::sync::Arc;

use gloo::utils::document;
use log::LevelFilter;
use museum_page_app::{fault, PageApp, PageAppBuilder, PageEvent};
use museum_page_core::error::CoreResult;
use museum_page_core::PageConfig;
use wasm_bindgen::prelude::*;

pub use bind::{attach, Bindings};
pub use page::WebPage;
pub use timer::GlooTimer;

/// Id of the optional `<script type="application/json">` element holding a [`PageConfig`]
pub const CONFIG_ELEMENT_ID: &str = "page-config";

/// Module entry point
#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = logger::init(LevelFilter::Info) {
        gloo::console::warn!(format!("Console logger not installed: {e}"));
    }
    install_panic_hook();

    let config = load_config();
    log::set_max_level(config.level_filter());

    match mount(config) {
        Ok(bindings) => bindings.forget(),
        Err(e) => fault::report("Page setup failed", &e),
    }
}

/// Build the controller over the live document and attach its listeners.
pub fn mount(config: PageConfig) -> CoreResult<Bindings> {
    let app = PageAppBuilder::new()
        .page(Arc::new(WebPage))
        .timer(Arc::new(GlooTimer))
        .config(config)
        .build()?;
    let app = Rc::new(app);
    let bindings = bind::attach(&app);

    // Highlight the section the page was loaded at.
    bind::dispatch(&app, PageEvent::Scroll { timestamp_ms: 0.0 }, None);

    Ok(bindings)
}

/// Read the config block, falling back to defaults when it is absent or invalid.
pub fn load_config() -> PageConfig {
    let Some(text) = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };

    match PageConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            fault::report("Ignoring page config", &e);
            PageConfig::default()
        }
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        fault::report_uncaught("panic", &info.to_string());
    }));
}

/// Controller handle for pages that drive it from JavaScript
#[wasm_bindgen]
pub struct MuseumPage {
    app: Rc<PageApp>,
    bindings: Option<Bindings>,
}

#[wasm_bindgen]
impl MuseumPage {
    /// Build a controller from a JSON config without attaching listeners
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MuseumPage, JsError> {
        let config = match config_json {
            Some(json) => PageConfig::from_json(&json)?,
            None => PageConfig::default(),
        };
        let app = PageAppBuilder::new()
            .page(Arc::new(WebPage))
            .timer(Arc::new(GlooTimer))
            .config(config)
            .build()?;
        Ok(Self {
            app: Rc::new(app),
            bindings: None,
        })
    }

    /// Attach the DOM listeners; calling it again is a no-op.
    pub fn attach(&mut self) {
        if self.bindings.is_none() {
            self.bindings = Some(bind::attach(&self.app));
        }
    }

    /// Detach the DOM listeners
    pub fn detach(&mut self) {
        self.bindings = None;
    }

    /// Href of the active navigation link
    #[wasm_bindgen(js_name = activeLink)]
    pub fn active_link(&self) -> Option<String> {
        self.app.navigation.active_link()
    }

    /// Current submission state (`idle`, `submitting` or `succeeded`)
    #[wasm_bindgen(js_name = submissionState)]
    pub fn submission_state(&self) -> String {
        self.app.contact_form.submission_state().to_string()
    }
}
