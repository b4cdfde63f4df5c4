use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

/// Authenticated Router Module
///
/// The user and calendar server actions. Every handler forwards the caller's
/// session token as a bearer credential; an anonymous call reaches the backend
/// without one and fails there, surfacing as `{success: false}`.
///
/// Every response is HTTP 200 with an `ActionResult` body.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/auth/current
        .route("/api/auth/current", get(handlers::current_user))
        // --- User Management ---
        // GET/POST /api/users
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        // POST /api/users/batch-delete
        .route("/api/users/batch-delete", post(handlers::batch_delete_users))
        // PUT/DELETE /api/users/{id}
        .route(
            "/api/users/{id}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        // PATCH /api/users/{id}/status
        .route("/api/users/{id}/status", patch(handlers::update_user_status))
        // --- Calendar ---
        // GET/POST /api/calendar/events
        .route(
            "/api/calendar/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        // POST /api/calendar/events/batch-delete
        .route(
            "/api/calendar/events/batch-delete",
            post(handlers::batch_delete_events),
        )
        // GET/PUT/DELETE /api/calendar/events/{id}
        .route(
            "/api/calendar/events/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        // POST /api/calendar/events/{id}/attendees
        .route(
            "/api/calendar/events/{id}/attendees",
            post(handlers::add_attendees),
        )
        // DELETE /api/calendar/events/{id}/attendees/{attendee_id}
        .route(
            "/api/calendar/events/{id}/attendees/{attendee_id}",
            delete(handlers::remove_attendee),
        )
        // PATCH /api/calendar/events/{id}/reschedule
        // Drag-and-drop move of an event.
        .route(
            "/api/calendar/events/{id}/reschedule",
            patch(handlers::reschedule_event),
        )
}
