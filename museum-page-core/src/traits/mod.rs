//! Platform abstraction trait definition

mod in_memory_page;
mod page;
mod submission_gateway;
mod timer;

pub use in_memory_page::{ErrorElement, InMemoryPage, RevealElement, SubmitControl};
pub use page::Page;
pub use submission_gateway::{SimulatedGateway, SubmissionGateway};
pub use timer::{Timer, TokioTimer};
