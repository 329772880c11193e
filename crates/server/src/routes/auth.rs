use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use service::auth::domain::{Claims, LoginInput, RegisterInput};
use service::auth::AuthService;
use service::planner::PlannerService;

use crate::errors::ApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub planner: PlannerService,
    pub auth: AuthService,
}

#[derive(Serialize)]
pub struct RegisterOutput { pub organizer_id: i32 }

#[derive(Serialize)]
pub struct LoginOutput { pub organizer_id: i32, pub name: String, pub email: String, pub token: String }

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, ApiError> {
    let user = state.auth.register(input).await?;
    Ok(Json(RegisterOutput { organizer_id: user.id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let user = session.user;
    let out = LoginOutput { organizer_id: user.id, name: user.name, email: user.email, token: session.token };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged Out")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

fn is_open_path(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS
        || path == "/health"
        || path.starts_with("/auth/")
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || !path.starts_with("/api/")
}

fn cookie_token(req: &Request) -> Option<String> {
    let raw = req.headers().get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}

/// Guards `/api/*`: a missing token is 400, an invalid or expired one 401.
/// `Authorization: Bearer` wins over the `auth_token` cookie.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    if is_open_path(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let token = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(ApiError::unauthorized("expected a Bearer token"));
            }
        },
        None => match cookie_token(&req) {
            Some(t) => t,
            None => {
                tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(ApiError::bad_request("missing bearer token"));
            }
        },
    };

    match state.auth.validate_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert::<Claims>(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(ApiError::unauthorized("invalid or expired token"))
        }
    }
}
