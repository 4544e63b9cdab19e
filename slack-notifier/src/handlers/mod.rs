//! HTTP handlers for slack-notifier.

pub mod health;
pub mod pages;
pub mod trigger;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use pages::home;
pub use trigger::trigger;
