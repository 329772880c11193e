use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use common::types::Created;
use service::errors::EntityKind;
use service::planner::domain::{Activity, Attendee, Event, EventPayload, Organizer};

use super::{parse_id, required_body};
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/Event", tag = "event", responses((status = 200, description = "All events", body = [crate::openapi::EventDoc]), (status = 400, description = "Empty list (strict mode)")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(state.planner.get_all_events().await?))
}

#[utoipa::path(get, path = "/api/Event/{id}", tag = "event", params(("id" = i32, Path, description = "Event id")), responses((status = 200, description = "Event", body = crate::openapi::EventDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Event>, ApiError> {
    let id = parse_id(&id, EntityKind::Event)?;
    Ok(Json(state.planner.get_event_by_id(id).await?))
}

#[utoipa::path(get, path = "/api/Event/name/{name}", tag = "event", params(("name" = String, Path, description = "Event name")), responses((status = 200, description = "Event", body = crate::openapi::EventDoc), (status = 404, description = "Not found")))]
pub async fn get_by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.planner.get_event_by_name(&name).await?))
}

#[utoipa::path(post, path = "/api/Event", tag = "event", request_body = crate::openapi::EventDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid event")))]
pub async fn create(
    State(state): State<ServerState>,
    body: Option<Json<EventPayload>>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let payload = required_body(body, EntityKind::Event)?;
    let id = state.planner.add_event(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(put, path = "/api/Event", tag = "event", request_body = crate::openapi::EventDoc, responses((status = 204, description = "Replaced"), (status = 400, description = "Invalid event"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    body: Option<Json<EventPayload>>,
) -> Result<StatusCode, ApiError> {
    let payload = required_body(body, EntityKind::Event)?;
    state.planner.edit_event(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/Event/{id}", tag = "event", params(("id" = i32, Path, description = "Event id")), responses((status = 204, description = "Removed"), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, EntityKind::Event)?;
    state.planner.remove_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/Event/organizer/{id}", tag = "event", params(("id" = i32, Path, description = "Organizer id")), responses((status = 200, description = "Events of the organizer", body = [crate::openapi::EventDoc]), (status = 404, description = "Organizer not found")))]
pub async fn by_organizer(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vec<Event>>, ApiError> {
    let id = parse_id(&id, EntityKind::Organizer)?;
    Ok(Json(state.planner.get_events_by_organizer_id(id).await?))
}

#[utoipa::path(get, path = "/api/Event/{id}/activities", tag = "event", params(("id" = i32, Path, description = "Event id")), responses((status = 200, description = "Activities of the event", body = [crate::openapi::ActivityDoc]), (status = 404, description = "Event not found")))]
pub async fn activities(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vec<Activity>>, ApiError> {
    let id = parse_id(&id, EntityKind::Event)?;
    Ok(Json(state.planner.get_event_activities(id).await?))
}

#[utoipa::path(get, path = "/api/Event/{id}/attendees", tag = "event", params(("id" = i32, Path, description = "Event id")), responses((status = 200, description = "Attendees of the event", body = [crate::openapi::AttendeeDoc]), (status = 404, description = "Event not found")))]
pub async fn attendees(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vec<Attendee>>, ApiError> {
    let id = parse_id(&id, EntityKind::Event)?;
    Ok(Json(state.planner.get_event_attendees(id).await?))
}

#[utoipa::path(get, path = "/api/Event/{id}/organizer", tag = "event", params(("id" = i32, Path, description = "Event id")), responses((status = 200, description = "Organizer of the event", body = crate::openapi::OrganizerDoc), (status = 404, description = "Event not found")))]
pub async fn organizer(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Organizer>, ApiError> {
    let id = parse_id(&id, EntityKind::Event)?;
    Ok(Json(state.planner.get_event_organizer(id).await?))
}
