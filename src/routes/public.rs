use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints usable before signing in: health, login/logout and the static
/// route and menu metadata the client needs to render navigation.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /api/health
        // Liveness check. Lives under /api so the session gate never redirects it.
        .route("/api/health", get(|| async { "ok" }))
        // POST /api/auth/login
        // Proxies credentials to the backend and sets the `token` cookie on success.
        .route("/api/auth/login", post(handlers::login))
        // POST /api/auth/logout
        // Clears the `token` cookie.
        .route("/api/auth/logout", post(handlers::logout))
        // GET /api/route-info?path=...
        // Public/auth flags, permission, title and rule label for a path.
        .route("/api/route-info", get(handlers::route_info))
        // GET /api/menu?granted=...
        .route("/api/menu", get(handlers::menu))
}
