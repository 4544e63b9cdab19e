//! slack-notifier: posts a fixed Slack direct message on `POST /trigger`.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
