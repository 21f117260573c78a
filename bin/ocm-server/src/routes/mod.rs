//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional OpenAPI document endpoint (disable with `OCM_ENABLE_OPENAPI=false`)
//! - Health / heartbeat route
//! - Public catalog `/v1` routes
//! - Admin `/admin` routes (session token required except for `/admin/login`)
//! - HTML gallery and admin panel

mod admin;
pub mod doc;
mod health;
mod ui;
mod v1;

use axum::routing::get;
use axum::{Router, middleware};
use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .merge(health::router())
        .nest("/v1", v1::router())
        .nest("/admin", admin::router(state.clone()));

    let mut app = Router::new().merge(api_router).merge(ui::router());

    if state.config.enable_openapi {
        app = app.route("/api-docs/openapi.json", get(doc::openapi_json));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
