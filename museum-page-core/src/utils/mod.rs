//! 工具模块

pub mod datetime;
mod email;
mod throttle;

pub use email::is_valid_email;
pub use throttle::Throttle;
