//! Last-resort fault reporting
//!
//! Handler failures end here instead of propagating to the page.

use museum_page_core::error::CoreError;

/// Log a handler failure.
///
/// Expected errors (absent elements, rejected input, concurrent submit) are logged at `warn`,
/// everything else at `error`.
pub fn report(context: &str, error: &CoreError) {
    if error.is_expected() {
        log::warn!("{context}: {error}");
    } else {
        log::error!("{context}: {error}");
    }
}

/// Log a fault raised outside the controller (uncaught script error, panic).
pub fn report_uncaught(source: &str, message: &str) {
    log::error!("Uncaught {source}: {message}");
}
