use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::PlannerError;

/// JSON error body: `{"error": "<Title>", "message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title, message: self.message.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<PlannerError> for ApiError {
    fn from(e: PlannerError) -> Self {
        let (status, title) = match &e {
            PlannerError::InvalidId(_) => (StatusCode::BAD_REQUEST, "Invalid Id"),
            PlannerError::NullObject(_) => (StatusCode::BAD_REQUEST, "Null Object"),
            PlannerError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            PlannerError::InvalidName(_) => (StatusCode::BAD_REQUEST, "Invalid Name"),
            PlannerError::EmptyList(_) => (StatusCode::BAD_REQUEST, "Empty List"),
            PlannerError::Constraint(_) => (StatusCode::BAD_REQUEST, "Constraint Violation"),
            PlannerError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            PlannerError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "planner store failure");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let (status, title) = match &e {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            AuthError::Conflict => (StatusCode::CONFLICT, "Conflict"),
            AuthError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "auth failure");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::EntityKind;

    #[test]
    fn planner_errors_map_to_status() {
        let cases = [
            (PlannerError::invalid_id(EntityKind::Event), StatusCode::BAD_REQUEST),
            (PlannerError::null_object(EntityKind::Activity), StatusCode::BAD_REQUEST),
            (PlannerError::Constraint("fk".into()), StatusCode::BAD_REQUEST),
            (PlannerError::EmptyList("none".into()), StatusCode::BAD_REQUEST),
            (PlannerError::missing_id(EntityKind::Attendee, 3), StatusCode::NOT_FOUND),
            (PlannerError::Repository("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn auth_errors_map_to_status() {
        assert_eq!(ApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
        assert_eq!(ApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn message_carries_the_planner_text() {
        let e = ApiError::from(PlannerError::missing_id(EntityKind::Event, 9));
        assert_eq!(e.title, "Not Found");
        assert_eq!(e.message.as_deref(), Some("No event was found for id 9"));
    }
}
