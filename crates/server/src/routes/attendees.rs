use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use common::types::Created;
use service::errors::EntityKind;
use service::planner::domain::{Attendee, AttendeePayload};

use super::{parse_id, required_body};
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/Attendee", tag = "attendee", responses((status = 200, description = "All attendees", body = [crate::openapi::AttendeeDoc]), (status = 400, description = "Empty list (strict mode)")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Attendee>>, ApiError> {
    Ok(Json(state.planner.get_all_attendees().await?))
}

#[utoipa::path(get, path = "/api/Attendee/{id}", tag = "attendee", params(("id" = i32, Path, description = "Attendee id")), responses((status = 200, description = "Attendee", body = crate::openapi::AttendeeDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Attendee>, ApiError> {
    let id = parse_id(&id, EntityKind::Attendee)?;
    Ok(Json(state.planner.get_attendee_by_id(id).await?))
}

#[utoipa::path(get, path = "/api/Attendee/name/{name}", tag = "attendee", params(("name" = String, Path, description = "Attendee name")), responses((status = 200, description = "Attendee", body = crate::openapi::AttendeeDoc), (status = 404, description = "Not found")))]
pub async fn get_by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<Attendee>, ApiError> {
    Ok(Json(state.planner.get_attendee_by_name(&name).await?))
}

#[utoipa::path(post, path = "/api/Attendee", tag = "attendee", request_body = crate::openapi::AttendeeDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid attendee")))]
pub async fn create(
    State(state): State<ServerState>,
    body: Option<Json<AttendeePayload>>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let payload = required_body(body, EntityKind::Attendee)?;
    let id = state.planner.add_attendee(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(put, path = "/api/Attendee", tag = "attendee", request_body = crate::openapi::AttendeeDoc, responses((status = 204, description = "Replaced"), (status = 400, description = "Invalid attendee"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    body: Option<Json<AttendeePayload>>,
) -> Result<StatusCode, ApiError> {
    let payload = required_body(body, EntityKind::Attendee)?;
    state.planner.edit_attendee(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/Attendee/{id}", tag = "attendee", params(("id" = i32, Path, description = "Attendee id")), responses((status = 204, description = "Removed"), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, EntityKind::Attendee)?;
    state.planner.remove_attendee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
