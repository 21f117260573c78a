use ocm_types::Category;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DescribeRequest {
    pub title: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DescribeResponse {
    pub description: String,
    /// `false` when `description` is fallback text.
    pub generated: bool,
}
