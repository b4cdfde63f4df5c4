use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

use crate::error::ActionError;

// --- Backend Contract ---

/// ApiEnvelope
///
/// The backend wraps every response as `{code, message?, data}`.
/// Codes 200 and 0 mean success; anything else is a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.code, 200 | 0)
    }
}

/// ActionResult
///
/// The uniform outcome of every server action. Safe to show to the user as is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Folds an action outcome. `fallback` replaces an empty error message.
    pub fn from_outcome(outcome: Result<Option<T>, ActionError>, fallback: &str) -> Self {
        match outcome {
            Ok(data) => Self::ok(data),
            Err(err) => {
                let message = err.to_string();
                if message.is_empty() {
                    Self::failure(fallback)
                } else {
                    Self::failure(message)
                }
            }
        }
    }
}

// --- Lenient Ids ---

/// An id as the backend may send it: a string or a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn strings_or_numbers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .map(String::from)
        .collect())
}

// --- Users ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    /// Any status this gateway does not know about.
    #[serde(other)]
    Unknown,
}

/// User
///
/// A user record as returned by the backend. Unknown fields are ignored and
/// numeric ids are read as strings.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// LoginFormData
///
/// `remember` selects a 7-day session cookie instead of a 1-day one.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Payload of a successful login. The token is also written to the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct LoginPayload {
    pub user: User,
    pub token: String,
}

/// UserFormData
///
/// Create payload (POST /users).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserFormData {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// UserFormPatch
///
/// Partial update payload (PUT /users/{id}). Only provided fields are sent.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserFormPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Query parameters for GET /users. Absent values are not forwarded.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub keyword: Option<String>,
}

impl UserListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(keyword) = &self.keyword {
            query.push(("keyword".to_string(), keyword.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct UserPage {
    pub list: Vec<User>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StatusRequest {
    pub status: UserStatus,
}

/// Body of the batch-delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

// --- Calendar ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CalendarEventType {
    #[default]
    Meeting,
    Task,
    Reminder,
    Holiday,
    #[serde(other)]
    Other,
}

/// CalendarEvent
///
/// `start`/`end` are passed through verbatim (ISO-8601 strings, or plain dates
/// for all-day events).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalendarEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub event_type: Option<CalendarEventType>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "strings_or_numbers")]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub all_day: bool,
    pub color: Option<String>,
}

/// CalendarEventFormData
///
/// Create payload (POST /calendar/events).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalendarEventFormData {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<CalendarEventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

/// Partial update payload (PUT /calendar/events/{id}).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalendarEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<CalendarEventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

/// Query parameters for GET /calendar/events. Absent values are not forwarded.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CalendarSearchParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl CalendarSearchParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("type", &self.event_type),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AttendeesRequest {
    pub attendee_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RescheduleRequest {
    pub start: String,
    pub end: String,
}

// --- Route Metadata (Output) ---

/// RouteInfo
///
/// Classification of a single path, for UI gating and breadcrumbs.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteInfo {
    pub path: String,
    pub public: bool,
    pub auth_route: bool,
    pub permission: Option<String>,
    pub title: String,
    /// Label of the matching permission rule, if any.
    pub label: Option<String>,
}

/// PageShell
///
/// What a gated page request resolves to. `revision` is the path's cache
/// generation; it changes whenever a mutation revalidates the path.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct PageShell {
    pub path: String,
    pub title: String,
    pub permission: Option<String>,
    pub label: Option<String>,
    pub revision: u64,
}
