use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use common::types::Created;
use service::errors::EntityKind;
use service::planner::domain::{Activity, ActivityPayload};

use super::{parse_id, required_body};
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/Activity", tag = "activity", responses((status = 200, description = "All activities", body = [crate::openapi::ActivityDoc]), (status = 400, description = "Empty list (strict mode)")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Activity>>, ApiError> {
    Ok(Json(state.planner.get_all_activities().await?))
}

#[utoipa::path(get, path = "/api/Activity/{id}", tag = "activity", params(("id" = i32, Path, description = "Activity id")), responses((status = 200, description = "Activity", body = crate::openapi::ActivityDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Activity>, ApiError> {
    let id = parse_id(&id, EntityKind::Activity)?;
    Ok(Json(state.planner.get_activity_by_id(id).await?))
}

#[utoipa::path(get, path = "/api/Activity/name/{name}", tag = "activity", params(("name" = String, Path, description = "Activity name")), responses((status = 200, description = "Activity", body = crate::openapi::ActivityDoc), (status = 404, description = "Not found")))]
pub async fn get_by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<Activity>, ApiError> {
    Ok(Json(state.planner.get_activity_by_name(&name).await?))
}

#[utoipa::path(post, path = "/api/Activity", tag = "activity", request_body = crate::openapi::ActivityDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid activity")))]
pub async fn create(
    State(state): State<ServerState>,
    body: Option<Json<ActivityPayload>>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let payload = required_body(body, EntityKind::Activity)?;
    let id = state.planner.add_activity(payload).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(put, path = "/api/Activity", tag = "activity", request_body = crate::openapi::ActivityDoc, responses((status = 204, description = "Replaced"), (status = 400, description = "Invalid activity"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    body: Option<Json<ActivityPayload>>,
) -> Result<StatusCode, ApiError> {
    let payload = required_body(body, EntityKind::Activity)?;
    state.planner.edit_activity(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/Activity/{id}", tag = "activity", params(("id" = i32, Path, description = "Activity id")), responses((status = 204, description = "Removed"), (status = 400, description = "Invalid id"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, EntityKind::Activity)?;
    state.planner.remove_activity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
