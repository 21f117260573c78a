use crate::routes::{admin, health, v1};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "ocm-server",
    description = "OC material catalog API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(v1::api_docs());
    root.merge(admin::api_docs());
    root
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(get_docs())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = get_docs();
        for path in ["/health", "/v1/materials", "/admin/login", "/admin/materials/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
