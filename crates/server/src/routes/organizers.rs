use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use common::types::Created;
use service::errors::EntityKind;
use service::planner::domain::{Organizer, OrganizerPayload};

use super::{parse_id, required_body};
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/Organizer", tag = "organizer", responses((status = 200, description = "All organizers", body = [crate::openapi::OrganizerDoc]), (status = 400, description = "Empty list (strict mode)")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Organizer>>, ApiError> {
    Ok(Json(state.planner.get_all_organizers().await?))
}

#[utoipa::path(get, path = "/api/Organizer/{id}", tag = "organizer", params(("id" = i32, Path, description = "Organizer id")), responses((status = 200, description = "Organizer", body = crate::openapi::OrganizerDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Organizer>, ApiError> {
    let id = parse_id(&id, EntityKind::Organizer)?;
    Ok(Json(state.planner.get_organizer_by_id(id).await?))
}

#[utoipa::path(get, path = "/api/Organizer/name/{name}", tag = "organizer", params(("name" = String, Path, description = "Organizer name")), responses((status = 200, description = "Organizer", body = crate::openapi::OrganizerDoc), (status = 404, description = "Not found")))]
pub async fn get_by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<Organizer>, ApiError> {
    Ok(Json(state.planner.get_organizer_by_name(&name).await?))
}

#[utoipa::path(post, path = "/api/Organizer", tag = "organizer", request_body = crate::openapi::OrganizerDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid organizer")))]
pub async fn create(
    State(state): State<ServerState>,
    body: Option<Json<OrganizerPayload>>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let payload = required_body(body, EntityKind::Organizer)?;
    let id = state.planner.add_organizer(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(put, path = "/api/Organizer", tag = "organizer", request_body = crate::openapi::OrganizerDoc, responses((status = 204, description = "Replaced"), (status = 400, description = "Invalid organizer"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    body: Option<Json<OrganizerPayload>>,
) -> Result<StatusCode, ApiError> {
    let payload = required_body(body, EntityKind::Organizer)?;
    state.planner.edit_organizer(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/Organizer/{id}", tag = "organizer", params(("id" = i32, Path, description = "Organizer id")), responses((status = 204, description = "Removed"), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, EntityKind::Organizer)?;
    state.planner.remove_organizer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
