//! podflow: a guided six-stage wizard that turns an idea into a podcast
//! episode by driving an external automation backend over JSON webhooks.
//!
//! The library holds everything but the terminal UI, so the workflow can be
//! driven and tested against any [`api::Gateway`].

pub mod api;
pub mod config;
pub mod logging;
pub mod notifications;
pub mod state;
pub mod types;
pub mod workflow;
