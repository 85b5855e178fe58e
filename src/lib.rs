//! Tinywiki - a minimal wiki server
//!
//! Pages are plain files addressed by alphanumeric title. Requests are
//! validated and routed to view, edit and save handlers; page bodies have
//! their `[Title]` references turned into links when viewed.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

use axum::{extract::DefaultBodyLimit, Router};

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use types::{AppState, Operation, Page, Title, View};
pub use services::{LinkService, PageStore};
pub use components::{Renderer, TemplateComponent};

/// Build the application router
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .fallback(handlers::handle_request)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
