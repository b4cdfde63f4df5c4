use crate::{
    AppState,
    actions::{ActionContext, calendar, user},
    auth::{SessionToken, cleared_session_cookie, session_cookie},
    classifier::{
        find_permission_rule, get_route_permission, get_route_title, is_auth_route,
        is_public_route,
    },
    menu::{MenuNode, menu_tree, visible_menu},
    middleware::gate_applies,
    models::{
        ActionResult, AttendeesRequest, CalendarEvent, CalendarEventFormData, CalendarEventPatch,
        CalendarSearchParams, IdsRequest, LoginFormData, LoginPayload, PageShell,
        RescheduleRequest, RouteInfo, StatusRequest, User, UserFormData, UserFormPatch,
        UserListParams, UserPage,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

/// Builds the per-request action context from shared state and the caller's session.
fn context(state: &AppState, SessionToken(token): SessionToken) -> ActionContext {
    ActionContext::new(state.backend.clone(), state.cache.clone(), token)
}

// --- Session Handlers ---

/// login
///
/// [Public Route] Authenticates against the backend. On success the returned
/// token is also written to the `token` cookie (httpOnly, SameSite=Lax).
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginFormData,
    responses((status = 200, description = "ActionResult wrapping the user and token", body = LoginPayload))
)]
pub async fn login(
    State(state): State<AppState>,
    session: SessionToken,
    jar: CookieJar,
    Json(form): Json<LoginFormData>,
) -> (CookieJar, Json<ActionResult<LoginPayload>>) {
    let remember = form.remember;
    let result = user::login(&context(&state, session), form).await;

    let jar = match &result.data {
        Some(payload) if result.success => jar.add(session_cookie(
            &payload.token,
            remember,
            state.config.secure_cookies(),
        )),
        _ => jar,
    };

    (jar, Json(result))
}

/// logout
///
/// [Public Route] Clears the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "ActionResult without data"))
)]
pub async fn logout(
    State(state): State<AppState>,
    session: SessionToken,
    jar: CookieJar,
) -> (CookieJar, Json<ActionResult<()>>) {
    let result = user::logout(&context(&state, session)).await;
    let jar = jar.add(cleared_session_cookie(state.config.secure_cookies()));
    (jar, Json(result))
}

#[utoipa::path(
    get,
    path = "/api/auth/current",
    responses((status = 200, description = "ActionResult wrapping the current user", body = User))
)]
pub async fn current_user(
    State(state): State<AppState>,
    session: SessionToken,
) -> Json<ActionResult<User>> {
    Json(user::get_current_user(&context(&state, session)).await)
}

// --- User Management Handlers ---

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserListParams),
    responses((status = 200, description = "ActionResult wrapping a page of users", body = UserPage))
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: SessionToken,
    Query(params): Query<UserListParams>,
) -> Json<ActionResult<UserPage>> {
    Json(user::get_users(&context(&state, session), params).await)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserFormData,
    responses((status = 200, description = "ActionResult wrapping the created user", body = User))
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: SessionToken,
    Json(form): Json<UserFormData>,
) -> Json<ActionResult<User>> {
    Json(user::create_user(&context(&state, session), form).await)
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UserFormPatch,
    responses((status = 200, description = "ActionResult wrapping the updated user", body = User))
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
    Json(patch): Json<UserFormPatch>,
) -> Json<ActionResult<User>> {
    Json(user::update_user(&context(&state, session), &id, patch).await)
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses((status = 200, description = "ActionResult without data"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
) -> Json<ActionResult<()>> {
    Json(user::delete_user(&context(&state, session), &id).await)
}

#[utoipa::path(
    post,
    path = "/api/users/batch-delete",
    request_body = IdsRequest,
    responses((status = 200, description = "ActionResult without data"))
)]
pub async fn batch_delete_users(
    State(state): State<AppState>,
    session: SessionToken,
    Json(IdsRequest { ids }): Json<IdsRequest>,
) -> Json<ActionResult<()>> {
    Json(user::batch_delete_users(&context(&state, session), ids).await)
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(("id" = String, Path, description = "User ID")),
    request_body = StatusRequest,
    responses((status = 200, description = "ActionResult wrapping the updated user", body = User))
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
    Json(StatusRequest { status }): Json<StatusRequest>,
) -> Json<ActionResult<User>> {
    Json(user::update_user_status(&context(&state, session), &id, status).await)
}

// --- Calendar Handlers ---

#[utoipa::path(
    get,
    path = "/api/calendar/events",
    params(CalendarSearchParams),
    responses((status = 200, description = "ActionResult wrapping matching events", body = [CalendarEvent]))
)]
pub async fn list_events(
    State(state): State<AppState>,
    session: SessionToken,
    Query(params): Query<CalendarSearchParams>,
) -> Json<ActionResult<Vec<CalendarEvent>>> {
    Json(calendar::get_calendar_events(&context(&state, session), params).await)
}

#[utoipa::path(
    get,
    path = "/api/calendar/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    responses((status = 200, description = "ActionResult wrapping the event", body = CalendarEvent))
)]
pub async fn get_event(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::get_calendar_event(&context(&state, session), &id).await)
}

#[utoipa::path(
    post,
    path = "/api/calendar/events",
    request_body = CalendarEventFormData,
    responses((status = 200, description = "ActionResult wrapping the created event", body = CalendarEvent))
)]
pub async fn create_event(
    State(state): State<AppState>,
    session: SessionToken,
    Json(form): Json<CalendarEventFormData>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::create_calendar_event(&context(&state, session), form).await)
}

#[utoipa::path(
    put,
    path = "/api/calendar/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    request_body = CalendarEventPatch,
    responses((status = 200, description = "ActionResult wrapping the updated event", body = CalendarEvent))
)]
pub async fn update_event(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
    Json(patch): Json<CalendarEventPatch>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::update_calendar_event(&context(&state, session), &id, patch).await)
}

#[utoipa::path(
    delete,
    path = "/api/calendar/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    responses((status = 200, description = "ActionResult without data"))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
) -> Json<ActionResult<()>> {
    Json(calendar::delete_calendar_event(&context(&state, session), &id).await)
}

#[utoipa::path(
    post,
    path = "/api/calendar/events/batch-delete",
    request_body = IdsRequest,
    responses((status = 200, description = "ActionResult without data"))
)]
pub async fn batch_delete_events(
    State(state): State<AppState>,
    session: SessionToken,
    Json(IdsRequest { ids }): Json<IdsRequest>,
) -> Json<ActionResult<()>> {
    Json(calendar::batch_delete_calendar_events(&context(&state, session), ids).await)
}

#[utoipa::path(
    post,
    path = "/api/calendar/events/{id}/attendees",
    params(("id" = String, Path, description = "Event ID")),
    request_body = AttendeesRequest,
    responses((status = 200, description = "ActionResult wrapping the updated event", body = CalendarEvent))
)]
pub async fn add_attendees(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
    Json(AttendeesRequest { attendee_ids }): Json<AttendeesRequest>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::add_event_attendees(&context(&state, session), &id, attendee_ids).await)
}

#[utoipa::path(
    delete,
    path = "/api/calendar/events/{id}/attendees/{attendee_id}",
    params(
        ("id" = String, Path, description = "Event ID"),
        ("attendee_id" = String, Path, description = "Attendee user ID")
    ),
    responses((status = 200, description = "ActionResult wrapping the updated event", body = CalendarEvent))
)]
pub async fn remove_attendee(
    State(state): State<AppState>,
    session: SessionToken,
    Path((id, attendee_id)): Path<(String, String)>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::remove_event_attendee(&context(&state, session), &id, &attendee_id).await)
}

#[utoipa::path(
    patch,
    path = "/api/calendar/events/{id}/reschedule",
    params(("id" = String, Path, description = "Event ID")),
    request_body = RescheduleRequest,
    responses((status = 200, description = "ActionResult wrapping the moved event", body = CalendarEvent))
)]
pub async fn reschedule_event(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<String>,
    Json(RescheduleRequest { start, end }): Json<RescheduleRequest>,
) -> Json<ActionResult<CalendarEvent>> {
    Json(calendar::reschedule_event(&context(&state, session), &id, start, end).await)
}

// --- Route Metadata Handlers ---

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteInfoQuery {
    /// Page path to classify, e.g. `/users/42`.
    pub path: String,
}

/// route_info
///
/// Classification of a path for client-side gating and breadcrumbs.
#[utoipa::path(
    get,
    path = "/api/route-info",
    params(RouteInfoQuery),
    responses((status = 200, description = "Route classification", body = RouteInfo))
)]
pub async fn route_info(Query(RouteInfoQuery { path }): Query<RouteInfoQuery>) -> Json<RouteInfo> {
    Json(RouteInfo {
        public: is_public_route(&path),
        auth_route: is_auth_route(&path),
        permission: get_route_permission(&path).map(str::to_string),
        title: get_route_title(&path).to_string(),
        label: find_permission_rule(&path).map(|rule| rule.label.to_string()),
        path,
    })
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// Comma-separated permissions held by the viewer. Omit for the full tree.
    pub granted: Option<String>,
}

/// menu
///
/// The side navigation, optionally pruned to the viewer's permissions.
#[utoipa::path(
    get,
    path = "/api/menu",
    params(MenuQuery),
    responses((status = 200, description = "Menu tree", body = [MenuNode]))
)]
pub async fn menu(Query(MenuQuery { granted }): Query<MenuQuery>) -> Json<Vec<MenuNode>> {
    match granted {
        Some(granted) => {
            let granted: Vec<&str> = granted
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            Json(visible_menu(&granted))
        }
        None => Json(menu_tree()),
    }
}

/// page_shell
///
/// [Gated Route] Resolves any page path to its shell: title, required
/// permission, breadcrumb label and cache revision. Rendering is the client's job.
///
/// Paths outside the gate (unknown API routes, static files) are not pages: 404.
pub async fn page_shell(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<PageShell>, StatusCode> {
    let path = uri.path();
    if !gate_applies(path) {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(PageShell {
        path: path.to_string(),
        title: get_route_title(path).to_string(),
        permission: get_route_permission(path).map(str::to_string),
        label: find_permission_rule(path).map(|rule| rule.label.to_string()),
        revision: state.cache.path_generation(path),
    }))
}
