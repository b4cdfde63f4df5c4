use admin_pro::models::{
    ActionResult, ApiEnvelope, CalendarEvent, CalendarEventFormData, CalendarEventType,
    LoginFormData, User, UserFormPatch, UserStatus,
};
use serde_json::{Value, json};

// --- Backend Payloads ---

#[test]
fn test_calendar_event_type_field_mapping() {
    // The wire name is "type"; the Rust field is event_type.
    let event: CalendarEvent = serde_json::from_value(json!({
        "id": "e1",
        "title": "Release",
        "start": "2024-06-01",
        "end": "2024-06-01",
        "type": "holiday",
        "allDay": true
    }))
    .unwrap();

    assert_eq!(event.event_type, Some(CalendarEventType::Holiday));
    assert!(event.all_day);
    assert!(event.attendees.is_empty());

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "holiday");
    assert_eq!(value["allDay"], true);
    assert!(value.get("event_type").is_none());
}

#[test]
fn test_user_uses_camel_case_and_ignores_unknown_fields() {
    let user: User = serde_json::from_value(json!({
        "id": "u1",
        "name": "Alice",
        "email": "alice@example.com",
        "roleId": "r1",
        "lastLoginAt": "2024-05-01T08:00:00Z",
        "status": "inactive",
        "tenant": "ignored"
    }))
    .unwrap();

    assert_eq!(user.role_id.as_deref(), Some("r1"));
    assert_eq!(user.last_login_at.as_deref(), Some("2024-05-01T08:00:00Z"));
    assert_eq!(user.status, Some(UserStatus::Inactive));
}

#[test]
fn test_patch_serializes_only_provided_fields() {
    let patch = UserFormPatch {
        role_id: Some("r2".to_string()),
        status: Some(UserStatus::Suspended),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({"roleId": "r2", "status": "suspended"})
    );
}

#[test]
fn test_event_form_omits_absent_type() {
    let form = CalendarEventFormData {
        title: "Sync".to_string(),
        start: "2024-06-03T10:00:00Z".to_string(),
        end: "2024-06-03T10:30:00Z".to_string(),
        ..Default::default()
    };

    let value = serde_json::to_value(&form).unwrap();
    assert!(value.get("type").is_none());
    assert_eq!(value["title"], "Sync");
}

#[test]
fn test_login_form_remember_defaults_to_false() {
    let form: LoginFormData =
        serde_json::from_value(json!({"email": "a@b.c", "password": "pw"})).unwrap();
    assert!(!form.remember);
}

// --- Envelope & Result ---

#[test]
fn test_envelope_success_codes() {
    let ok: ApiEnvelope<Value> = serde_json::from_value(json!({"code": 0})).unwrap();
    assert!(ok.is_success());
    assert_eq!(ok.message, None);
    assert_eq!(ok.data, None);

    let ok: ApiEnvelope<Value> = serde_json::from_value(json!({"code": 200, "data": 1})).unwrap();
    assert!(ok.is_success());

    let failed: ApiEnvelope<Value> = serde_json::from_value(json!({"code": 201})).unwrap();
    assert!(!failed.is_success());
}

#[test]
fn test_action_result_omits_absent_fields() {
    let ok: ActionResult<()> = ActionResult::ok(None);
    assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"success": true}));

    let failed: ActionResult<User> = ActionResult::failure("请求失败");
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"success": false, "error": "请求失败"})
    );
}

// --- Lenient Backend Payloads ---

#[test]
fn test_numeric_ids_are_read_as_strings() {
    let user: User = serde_json::from_value(json!({
        "id": 7,
        "name": "Bob",
        "email": "bob@example.com"
    }))
    .unwrap();
    assert_eq!(user.id, "7");

    let event: CalendarEvent = serde_json::from_value(json!({
        "id": 42,
        "title": "Review",
        "start": "2024-06-01T10:00:00Z",
        "end": "2024-06-01T11:00:00Z",
        "attendees": [1, "u2"]
    }))
    .unwrap();
    assert_eq!(event.id, "42");
    assert_eq!(event.attendees, vec!["1".to_string(), "u2".to_string()]);
}

#[test]
fn test_unlisted_enum_values_do_not_fail() {
    let user: User = serde_json::from_value(json!({
        "id": "u1",
        "name": "Bob",
        "email": "bob@example.com",
        "status": "pending"
    }))
    .unwrap();
    assert_eq!(user.status, Some(UserStatus::Unknown));

    let event: CalendarEvent = serde_json::from_value(json!({
        "id": "e1",
        "title": "Offsite",
        "start": "2024-06-01",
        "end": "2024-06-02",
        "type": "travel"
    }))
    .unwrap();
    assert_eq!(event.event_type, Some(CalendarEventType::Other));
}
