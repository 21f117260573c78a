//! Gallery filtering over a point-in-time snapshot of the collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Category, MaterialRecord};

/// The "all categories" sentinel as it appears in query strings and selects.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection for the gallery: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    /// Empty input and `All` (any case) select every category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(s)
            .map(CategoryFilter::Only)
            .map_err(|_| UnknownCategory(s.to_owned()))
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Case-insensitive substring match against title or description.
pub fn matches_query(record: &MaterialRecord, query: &str) -> bool {
    let needle = query.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
}

/// Records matching both the text query and the category, in input order.
pub fn filter_materials(
    materials: &[MaterialRecord],
    query: &str,
    category: CategoryFilter,
) -> Vec<MaterialRecord> {
    materials
        .iter()
        .filter(|m| category.matches(m.category) && matches_query(m, query))
        .cloned()
        .collect()
}

/// The "all" sentinel followed by each category present in `materials`,
/// in order of first appearance.
pub fn available_categories(materials: &[MaterialRecord]) -> Vec<CategoryFilter> {
    let mut out = vec![CategoryFilter::All];
    for m in materials {
        let option = CategoryFilter::Only(m.category);
        if !out.contains(&option) {
            out.push(option);
        }
    }
    out
}
