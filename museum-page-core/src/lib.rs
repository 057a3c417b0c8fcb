//! Museum Page Core Library
//!
//! Provides the page behavior of the museum website, including:
//! - Navigation tracking (active link from scroll position, smooth anchor scrolling)
//! - Contact form validation and submission workflow
//! - Membership dialogs and card hover lift
//! - Scroll-reveal effects (fade in on first view, staggered per row)
//!
//! This library is platform-independent: the page itself is abstracted through the
//! [`Page`] trait, submissions through [`SubmissionGateway`] and delays through [`Timer`].
//! The browser binding lives in `museum-page-web`; tests run against [`InMemoryPage`].

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::PageConfig;
pub use error::{CoreError, CoreResult};
pub use traits::{InMemoryPage, Page, SubmissionGateway, Timer};
