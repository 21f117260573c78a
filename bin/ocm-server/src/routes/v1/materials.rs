//! Public gallery routes: browse, filter and download materials.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ocm_types::{CategoryFilter, MaterialRecord, available_categories, filter_materials};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::v1::materials::{MaterialListResponse, MaterialQuery};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_materials, get_material, download_material, list_categories),
    components(schemas(MaterialListResponse, MaterialRecord))
)]
pub struct MaterialsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/materials", get(list_materials))
        .route("/materials/{id}", get(get_material))
        .route("/materials/{id}/download", post(download_material))
        .route("/categories", get(list_categories))
}

pub(crate) fn category_labels(materials: &[MaterialRecord]) -> Vec<String> {
    available_categories(materials)
        .into_iter()
        .map(String::from)
        .collect()
}

#[utoipa::path(
    get,
    path = "/v1/materials",
    tag = "materials",
    params(MaterialQuery),
    responses(
        (status = 200, description = "Filtered materials, newest first", body = MaterialListResponse),
        (status = 400, description = "Unknown category"),
    )
)]
pub async fn list_materials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaterialQuery>,
) -> Result<Json<MaterialListResponse>, ServerError> {
    let filter: CategoryFilter = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e: ocm_types::UnknownCategory| ServerError::BadRequest(e.to_string()))?;

    let all = state.materials.load().await?;
    let materials = filter_materials(&all, query.q.as_deref().unwrap_or_default(), filter);

    Ok(Json(MaterialListResponse {
        categories: category_labels(&all),
        total: all.len(),
        materials,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/materials/{id}",
    tag = "materials",
    params(("id" = String, Path, description = "Material id")),
    responses(
        (status = 200, description = "The material", body = MaterialRecord),
        (status = 404, description = "No material with this id"),
    )
)]
pub async fn get_material(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MaterialRecord>, ServerError> {
    state
        .materials
        .load()
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("material '{id}' not found")))
}

/// Count a download and return the updated record.
#[utoipa::path(
    post,
    path = "/v1/materials/{id}/download",
    tag = "materials",
    params(("id" = String, Path, description = "Material id")),
    responses(
        (status = 200, description = "Download counted", body = MaterialRecord),
        (status = 404, description = "No material with this id"),
    )
)]
pub async fn download_material(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MaterialRecord>, ServerError> {
    state
        .materials
        .increment_downloads(&id)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("material '{id}' not found")))
}

#[utoipa::path(
    get,
    path = "/v1/categories",
    tag = "materials",
    responses(
        (status = 200, description = "`All` plus the categories in use", body = Vec<String>),
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ServerError> {
    let all = state.materials.load().await?;
    Ok(Json(category_labels(&all)))
}
