//! service-core: Shared HTTP infrastructure for the notifier services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
