use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Placeholder preview image used when the admin form leaves it blank.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/400/300";

/// Download link stored when no real file location is known.
pub const DEFAULT_DOWNLOAD_URL: &str = "#";

/// Closed set of material classifications.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Texture,
    Reference,
    Brush,
    Background,
}

/// A catalog entry representing one downloadable asset.
///
/// Serialised with camelCase field names; this is the on-disk shape of the
/// persisted collection and the JSON API shape alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    /// Caller-assigned, never reassigned.
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image_url: String,
    pub download_url: String,
    pub author: String,
    pub downloads: u64,
    /// Milliseconds since the Unix epoch.
    pub date_added: i64,
}

impl MaterialRecord {
    /// Copy of this record with the download counter bumped by one.
    pub fn with_incremented_downloads(&self) -> Self {
        Self {
            downloads: self.downloads.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Rejected admin form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' must not be blank")]
pub struct InvalidMaterial {
    pub field: &'static str,
}

/// Fields an admin supplies when publishing a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub title: String,
    pub category: Category,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_owned()
}

impl Default for NewMaterial {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::Texture,
            image_url: default_image_url(),
            author: String::new(),
            description: String::new(),
            download_url: None,
        }
    }
}

impl NewMaterial {
    /// Title, author and description are required.
    pub fn validate(&self) -> Result<(), InvalidMaterial> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidMaterial { field });
            }
        }
        Ok(())
    }

    /// Build the stored record. The id is derived from `now_ms`, so two
    /// records created in the same millisecond share an id.
    pub fn into_record(self, now_ms: i64) -> MaterialRecord {
        let image_url = if self.image_url.trim().is_empty() {
            default_image_url()
        } else {
            self.image_url
        };
        let download_url = self
            .download_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_URL.to_owned());

        MaterialRecord {
            id: now_ms.to_string(),
            title: self.title,
            description: self.description,
            category: self.category,
            image_url,
            download_url,
            author: self.author,
            downloads: 0,
            date_added: now_ms,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn record_uses_camel_case_json() {
        let record = NewMaterial {
            title: "Ink brush".into(),
            author: "someone".into(),
            description: "dry ink".into(),
            category: Category::Brush,
            ..NewMaterial::default()
        }
        .into_record(1_700_000_000_000);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["imageUrl"], DEFAULT_IMAGE_URL);
        assert_eq!(json["downloadUrl"], "#");
        assert_eq!(json["dateAdded"], 1_700_000_000_000i64);
        assert_eq!(json["category"], "Brush");
        assert_eq!(json["downloads"], 0);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(Category::from_str("texture").unwrap(), Category::Texture);
        assert_eq!(Category::from_str("BACKGROUND").unwrap(), Category::Background);
        assert!(Category::from_str("Sticker").is_err());
        assert_eq!(Category::Reference.to_string(), "Reference");
    }

    #[test]
    fn increment_saturates() {
        let mut record = NewMaterial::default().into_record(1);
        record.downloads = u64::MAX;
        assert_eq!(record.with_incremented_downloads().downloads, u64::MAX);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let form = NewMaterial {
            title: "Paper".into(),
            author: "   ".into(),
            description: "grain".into(),
            ..NewMaterial::default()
        };
        assert_eq!(form.validate(), Err(InvalidMaterial { field: "author" }));
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let form: NewMaterial = serde_json::from_str(
            r#"{"title":"Sky","category":"Background","author":"a","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(form.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(form.download_url, None);
    }
}
