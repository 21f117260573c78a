use ocm_types::MaterialRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Gallery query string: `?q=leather&category=Texture`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialQuery {
    /// Case-insensitive substring of title or description.
    #[serde(default)]
    pub q: Option<String>,
    /// A category name, or `All`.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaterialListResponse {
    pub materials: Vec<MaterialRecord>,
    /// `All` followed by the categories present in the whole collection.
    pub categories: Vec<String>,
    /// Size of the unfiltered collection.
    pub total: usize,
}
