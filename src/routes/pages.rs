use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Pages Router Module
///
/// Every page path resolves to a `PageShell`. The dashboard and the legal pages
/// are registered explicitly; anything else falls through to the same handler,
/// so nested paths such as `/users/42` resolve through the permission rules.
///
/// The authentication gate is layered over this router in `create_router`.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Dashboard.
        .route("/", get(handlers::page_shell))
        // GET /terms, /privacy
        // Legal pages. On the public allow-list, so the gate lets anonymous visitors through.
        .route("/terms", get(handlers::page_shell))
        .route("/privacy", get(handlers::page_shell))
        .fallback(handlers::page_shell)
}
