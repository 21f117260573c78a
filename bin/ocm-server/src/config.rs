//! Server configuration, loaded from environment variables at startup.

use crate::entities::DuplicateIdPolicy;

/// Runtime configuration for ocm-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://ocm.db"`). The file is
    /// created if it does not exist.
    pub database_url: String,

    /// Slot key under which the material collection is stored.
    pub collection_key: String,

    /// What `insert` does when the id is already present.
    pub duplicate_ids: DuplicateIdPolicy,

    /// The single admin credential pair.
    pub admin_username: String,
    pub admin_password: String,

    /// Gemini API key; `None` disables description drafting (callers get the
    /// fallback text).
    pub gemini_api_key: Option<String>,

    /// Model used for description drafting.
    pub gemini_model: String,

    /// Base URL of the Gemini REST API.
    pub gemini_base_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_openapi: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("OCM_BIND", "0.0.0.0:3000"),
            database_url: env_or("OCM_DATABASE_URL", "sqlite://ocm.db"),
            collection_key: env_or("OCM_COLLECTION_KEY", "oc_materials_db"),
            duplicate_ids: parse_env("OCM_DUPLICATE_IDS", DuplicateIdPolicy::Reject),
            admin_username: env_or("OCM_ADMIN_USER", "admin"),
            admin_password: env_or("OCM_ADMIN_PASSWORD", "admin"),
            gemini_api_key: std::env::var("OCM_GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: env_or("OCM_GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_base_url: env_or(
                "OCM_GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            log_level: env_or("OCM_LOG", "info"),
            log_json: env_flag("OCM_LOG_JSON", false),
            cors_allowed_origins: std::env::var("OCM_CORS_ORIGINS").ok(),
            enable_openapi: env_flag("OCM_ENABLE_OPENAPI", true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
            collection_key: "oc_materials_db".to_owned(),
            duplicate_ids: DuplicateIdPolicy::Reject,
            admin_username: "admin".to_owned(),
            admin_password: "admin".to_owned(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_owned(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_openapi: true,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
