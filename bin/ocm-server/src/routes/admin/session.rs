//! Admin login / logout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::middleware::auth::session_token;
use crate::schemas::admin::session::{LoginRequest, LoginResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(login, logout),
    components(schemas(LoginRequest, LoginResponse))
)]
pub struct SessionApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let token = state
        .gate
        .login(&req.username, &req.password)
        .map_err(|e| ServerError::Unauthorized(e.to_string()))?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "Session closed", body = serde_json::Value),
        (status = 401, description = "Unauthorised (admin session required)"),
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let closed = session_token(&headers).is_some_and(|t| state.gate.logout(t));
    Json(serde_json::json!({ "logged_out": closed }))
}
