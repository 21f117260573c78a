//! Admin catalog mutations: publish and remove materials.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, post};
use axum::{Json, Router};
use ocm_types::{Category, MaterialRecord, NewMaterial};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_material, delete_material),
    components(schemas(NewMaterial, MaterialRecord, Category))
)]
pub struct AdminMaterialsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/materials", post(create_material))
        .route("/materials/{id}", delete(delete_material))
}

#[utoipa::path(
    post,
    path = "/admin/materials",
    tag = "admin",
    request_body = NewMaterial,
    responses(
        (status = 200, description = "Material published; full collection returned", body = Vec<MaterialRecord>),
        (status = 400, description = "A required field is blank"),
        (status = 401, description = "Unauthorised (admin session required)"),
        (status = 409, description = "A material with the generated id already exists"),
    )
)]
pub async fn create_material(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewMaterial>,
) -> Result<Json<Vec<MaterialRecord>>, ServerError> {
    form.validate()
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;
    let materials = state.materials.insert(form.into_record((state.clock)())).await?;
    Ok(Json(materials))
}

#[utoipa::path(
    delete,
    path = "/admin/materials/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material removed (or was absent); full collection returned", body = Vec<MaterialRecord>),
        (status = 401, description = "Unauthorised (admin session required)"),
    )
)]
pub async fn delete_material(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MaterialRecord>>, ServerError> {
    Ok(Json(state.materials.delete(&id).await?))
}
