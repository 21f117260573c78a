//! Draft a material description with the generative text collaborator.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use ocm_types::Category;
use tracing::{error, warn};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::admin::describe::{DescribeRequest, DescribeResponse};
use crate::services::{DescriptionError, DescriptionGenerator};
use crate::state::AppState;

pub const MISSING_KEY_FALLBACK: &str = "API key missing, please write the description manually.";
pub const REMOTE_FALLBACK: &str = "Unable to generate a description right now.";
pub const EMPTY_FALLBACK: &str = "Could not generate a description.";

#[derive(OpenApi)]
#[openapi(
    paths(describe),
    components(schemas(DescribeRequest, DescribeResponse))
)]
pub struct DescribeApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/describe", post(describe))
}

/// Ask the generator for a description, substituting fixed fallback text on
/// any failure. Never fails itself.
pub async fn draft_description(
    describer: &dyn DescriptionGenerator,
    title: &str,
    category: Category,
) -> DescribeResponse {
    match describer.generate(title, category).await {
        Ok(description) => DescribeResponse {
            description,
            generated: true,
        },
        Err(e) => {
            let fallback = match &e {
                DescriptionError::MissingCredential => {
                    warn!("description generator API key missing");
                    MISSING_KEY_FALLBACK
                }
                DescriptionError::Remote(_) => {
                    error!(error = %e, "description generation failed");
                    REMOTE_FALLBACK
                }
                DescriptionError::Empty => {
                    warn!(title, "description generator returned no text");
                    EMPTY_FALLBACK
                }
            };
            DescribeResponse {
                description: fallback.to_owned(),
                generated: false,
            }
        }
    }
}

#[utoipa::path(
    post,
    path = "/admin/describe",
    tag = "admin",
    request_body = DescribeRequest,
    responses(
        (status = 200, description = "Drafted description, or fallback text", body = DescribeResponse),
        (status = 400, description = "Title is blank"),
        (status = 401, description = "Unauthorised (admin session required)"),
    )
)]
pub async fn describe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DescribeRequest>,
) -> Result<Json<DescribeResponse>, ServerError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ServerError::BadRequest("enter a title first".into()));
    }
    Ok(Json(
        draft_description(state.describer.as_ref(), title, req.category).await,
    ))
}
