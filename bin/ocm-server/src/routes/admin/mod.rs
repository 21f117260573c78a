pub mod describe;
pub mod materials;
pub mod session;

use crate::middleware::auth;
use crate::state::AppState;

use axum::routing::post;
use axum::{Router, middleware};
use std::sync::Arc;
use utoipa::OpenApi;

/// Routes nested under `/admin`. Everything except `/login` needs a live
/// admin session.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .merge(materials::router())
        .merge(describe::router())
        .route("/logout", post(session::logout))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new().merge(session::router()).merge(protected)
}

#[derive(OpenApi)]
#[openapi()]
pub struct AdminApi;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = AdminApi::openapi();
    spec.merge(session::SessionApi::openapi());
    spec.merge(materials::AdminMaterialsApi::openapi());
    spec.merge(describe::DescribeApi::openapi());
    spec
}
