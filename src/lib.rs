use axum::{Router, extract::FromRef, http::HeaderName, middleware::from_fn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Route permission resolution.
pub mod classifier;
pub mod menu;
pub mod permissions;

// Session gate and server actions.
pub mod actions;
pub mod auth;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

// Module for routing segregation (Public, Authenticated, Pages).
pub mod routes;
use routes::{authenticated, pages, public};

// --- Public Re-exports ---

pub use backend::{BackendState, MockBackend, RestBackend};
pub use cache::{CacheState, RevalidationRegistry};
pub use config::AppConfig;

/// ApiDoc
///
/// OpenAPI document for the `/api` surface, served at `/api/openapi.json`
/// with Swagger UI at `/api/docs`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::logout, handlers::current_user,
        handlers::list_users, handlers::create_user, handlers::update_user,
        handlers::delete_user, handlers::batch_delete_users, handlers::update_user_status,
        handlers::list_events, handlers::get_event, handlers::create_event,
        handlers::update_event, handlers::delete_event, handlers::batch_delete_events,
        handlers::add_attendees, handlers::remove_attendee, handlers::reschedule_event,
        handlers::route_info, handlers::menu
    ),
    components(
        schemas(
            models::User, models::UserStatus, models::LoginFormData, models::LoginPayload,
            models::UserFormData, models::UserFormPatch, models::UserPage, models::StatusRequest,
            models::IdsRequest, models::CalendarEvent, models::CalendarEventType,
            models::CalendarEventFormData, models::CalendarEventPatch,
            models::AttendeesRequest, models::RescheduleRequest, models::RouteInfo,
            models::PageShell, menu::MenuNode,
        )
    ),
    tags(
        (name = "admin-pro", description = "Admin Pro gateway API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, cheaply cloneable container for the services every request needs.
#[derive(Clone)]
pub struct AppState {
    /// Transport to the backend REST API.
    pub backend: BackendState,
    /// Revalidation registry touched by mutating actions.
    pub cache: CacheState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for BackendState {
    fn from_ref(app_state: &AppState) -> BackendState {
        app_state.backend.clone()
    }
}

impl FromRef<AppState> for CacheState {
    fn from_ref(app_state: &AppState) -> CacheState {
        app_state.cache.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routes, applies the session gate and the observability layers,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation. Under /api so the gate leaves it alone.
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        // Pages carry the fallback, so every unmatched path becomes a page shell.
        .merge(pages::page_routes())
        // The gate sees every request and decides itself which paths it covers.
        .layer(from_fn(middleware::auth_gate))
        .with_state(state);

    base_router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Span for one request, correlated by its `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
