use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::errors::{EntityKind, PlannerError};

use crate::openapi::ApiDoc;

pub mod activities;
pub mod attendees;
pub mod auth;
pub mod events;
pub mod organizers;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Path ids arrive as text so a non-integer is reported like any other bad id.
pub(crate) fn parse_id(raw: &str, kind: EntityKind) -> Result<i32, PlannerError> {
    raw.trim().parse::<i32>().map_err(|_| PlannerError::invalid_id(kind))
}

/// A missing or undecodable JSON body counts as a null object.
pub(crate) fn required_body<T>(body: Option<Json<T>>, kind: EntityKind) -> Result<T, PlannerError> {
    body.map(|Json(inner)| inner).ok_or_else(|| PlannerError::null_object(kind))
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/Event", get(events::list).post(events::create).put(events::update))
        .route("/api/Event/:id", get(events::get).delete(events::delete))
        .route("/api/Event/name/:name", get(events::get_by_name))
        .route("/api/Event/organizer/:id", get(events::by_organizer))
        .route("/api/Event/:id/activities", get(events::activities))
        .route("/api/Event/:id/attendees", get(events::attendees))
        .route("/api/Event/:id/organizer", get(events::organizer))
        .route("/api/Activity", get(activities::list).post(activities::create).put(activities::update))
        .route("/api/Activity/:id", get(activities::get).delete(activities::delete))
        .route("/api/Activity/name/:name", get(activities::get_by_name))
        .route("/api/Attendee", get(attendees::list).post(attendees::create).put(attendees::update))
        .route("/api/Attendee/:id", get(attendees::get).delete(attendees::delete))
        .route("/api/Attendee/name/:name", get(attendees::get_by_name))
        .route("/api/Organizer", get(organizers::list).post(organizers::create).put(organizers::update))
        .route("/api/Organizer/:id", get(organizers::get).delete(organizers::delete))
        .route("/api/Organizer/name/:name", get(organizers::get_by_name))
}

/// Build the full application router: public pages and docs, auth, and the
/// token-guarded planner API.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = format!("{}/index.html", frontend_dir.trim_end_matches('/'));
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let api = api_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    public
        .merge(api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
}
