use axum::http::Method;
use serde_json::json;

use super::{ActionContext, finish, to_body};
use crate::{
    backend::BackendRequest,
    error::ActionError,
    models::{
        ActionResult, CalendarEvent, CalendarEventFormData, CalendarEventPatch,
        CalendarSearchParams,
    },
};

/// Cache tag covering every calendar listing.
pub const CALENDAR_TAG: &str = "calendar";
const CALENDAR_PATH: &str = "/calendar";
const EVENTS_ENDPOINT: &str = "/calendar/events";

/// Every calendar mutation invalidates the same tag and page.
fn revalidate_calendar(ctx: &ActionContext) {
    ctx.revalidate(Some(CALENDAR_TAG), &[CALENDAR_PATH]);
}

pub async fn get_calendar_events(
    ctx: &ActionContext,
    params: CalendarSearchParams,
) -> ActionResult<Vec<CalendarEvent>> {
    let request = BackendRequest::get(EVENTS_ENDPOINT).with_query(params.to_query());
    let outcome = ctx.fetch(request).await;
    finish("get_calendar_events", outcome, "获取日历事件失败")
}

pub async fn get_calendar_event(ctx: &ActionContext, id: &str) -> ActionResult<CalendarEvent> {
    let outcome = ctx
        .fetch(BackendRequest::get(format!("{EVENTS_ENDPOINT}/{id}")))
        .await;
    finish("get_calendar_event", outcome, "获取事件失败")
}

pub async fn create_calendar_event(
    ctx: &ActionContext,
    form: CalendarEventFormData,
) -> ActionResult<CalendarEvent> {
    let outcome: Result<Option<CalendarEvent>, ActionError> = async {
        let request = BackendRequest::new(Method::POST, EVENTS_ENDPOINT).with_body(to_body(&form)?);
        let event = ctx.fetch(request).await?;
        revalidate_calendar(ctx);
        Ok(event)
    }
    .await;
    finish("create_calendar_event", outcome, "创建事件失败")
}

pub async fn update_calendar_event(
    ctx: &ActionContext,
    id: &str,
    patch: CalendarEventPatch,
) -> ActionResult<CalendarEvent> {
    let outcome: Result<Option<CalendarEvent>, ActionError> = async {
        let request = BackendRequest::new(Method::PUT, format!("{EVENTS_ENDPOINT}/{id}"))
            .with_body(to_body(&patch)?);
        let event = ctx.fetch(request).await?;
        revalidate_calendar(ctx);
        Ok(event)
    }
    .await;
    finish("update_calendar_event", outcome, "更新事件失败")
}

pub async fn delete_calendar_event(ctx: &ActionContext, id: &str) -> ActionResult<()> {
    let outcome: Result<Option<()>, ActionError> = async {
        ctx.execute(BackendRequest::delete(format!("{EVENTS_ENDPOINT}/{id}")))
            .await?;
        revalidate_calendar(ctx);
        Ok(None)
    }
    .await;
    finish("delete_calendar_event", outcome, "删除事件失败")
}

pub async fn batch_delete_calendar_events(
    ctx: &ActionContext,
    ids: Vec<String>,
) -> ActionResult<()> {
    let outcome: Result<Option<()>, ActionError> = async {
        let request = BackendRequest::new(Method::POST, format!("{EVENTS_ENDPOINT}/batch-delete"))
            .with_body(json!({ "ids": ids }));
        ctx.execute(request).await?;
        revalidate_calendar(ctx);
        Ok(None)
    }
    .await;
    finish("batch_delete_calendar_events", outcome, "批量删除失败")
}

pub async fn add_event_attendees(
    ctx: &ActionContext,
    id: &str,
    attendee_ids: Vec<String>,
) -> ActionResult<CalendarEvent> {
    let outcome: Result<Option<CalendarEvent>, ActionError> = async {
        let request =
            BackendRequest::new(Method::POST, format!("{EVENTS_ENDPOINT}/{id}/attendees"))
                .with_body(json!({ "attendeeIds": attendee_ids }));
        let event = ctx.fetch(request).await?;
        revalidate_calendar(ctx);
        Ok(event)
    }
    .await;
    finish("add_event_attendees", outcome, "添加参与者失败")
}

pub async fn remove_event_attendee(
    ctx: &ActionContext,
    id: &str,
    attendee_id: &str,
) -> ActionResult<CalendarEvent> {
    let outcome: Result<Option<CalendarEvent>, ActionError> = async {
        let request =
            BackendRequest::delete(format!("{EVENTS_ENDPOINT}/{id}/attendees/{attendee_id}"));
        let event = ctx.fetch(request).await?;
        revalidate_calendar(ctx);
        Ok(event)
    }
    .await;
    finish("remove_event_attendee", outcome, "移除参与者失败")
}

/// reschedule_event
///
/// Moves an event in time (drag-and-drop in the calendar view).
pub async fn reschedule_event(
    ctx: &ActionContext,
    id: &str,
    start: String,
    end: String,
) -> ActionResult<CalendarEvent> {
    let outcome: Result<Option<CalendarEvent>, ActionError> = async {
        let request =
            BackendRequest::new(Method::PATCH, format!("{EVENTS_ENDPOINT}/{id}/reschedule"))
                .with_body(json!({ "start": start, "end": end }));
        let event = ctx.fetch(request).await?;
        revalidate_calendar(ctx);
        Ok(event)
    }
    .await;
    finish("reschedule_event", outcome, "调整时间失败")
}
