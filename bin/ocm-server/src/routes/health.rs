//! Liveness of the server and reachability of the material collection.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Reads the collection slot and reports its size.
///
/// `503` with `"status": "degraded"` when the slot cannot be read.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Collection readable", body = Value),
        (status = 503, description = "Collection slot unreadable", body = Value),
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let collection = state.materials.key();
    match state.materials.load().await {
        Ok(materials) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "collection": collection,
                "materials": materials.len(),
            })),
        ),
        Err(e) => {
            warn!(error = %e, collection, "material collection unreadable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "version": env!("CARGO_PKG_VERSION"),
                    "collection": collection,
                })),
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::db::SlotStore;
    use crate::db::sqlite::SqliteStore;

    fn state(slots: SqliteStore) -> Arc<AppState> {
        Arc::new(AppState::new(Config::default(), slots).unwrap())
    }

    #[tokio::test]
    async fn reports_collection_key_and_size() {
        let state = state(SqliteStore::in_memory().await.unwrap());
        let (status, Json(body)) = get_health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["collection"], "oc_materials_db");
        assert_eq!(body["materials"], 3);
    }

    #[tokio::test]
    async fn unreadable_collection_is_degraded() {
        let slots = SqliteStore::in_memory().await.unwrap();
        slots.put_slot("oc_materials_db", "{broken").await.unwrap();

        let (status, Json(body)) = get_health(State(state(slots))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["collection"], "oc_materials_db");
    }
}
