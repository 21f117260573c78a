//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::db::sqlite::SqliteStore;
use crate::entities::MaterialStore;
use crate::services::{AdminGate, DescriptionGenerator, GeminiGenerator, StaticCredentials};
use crate::ui::Views;

/// Source of "now" in milliseconds since the Unix epoch. New material ids
/// are taken from it.
pub type Clock = fn() -> i64;

pub fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// The material collection; sole owner of persistence.
    pub materials: Arc<MaterialStore<SqliteStore>>,
    /// Session-scoped admin authentication.
    pub gate: Arc<AdminGate>,
    /// Optional description drafting.
    pub describer: Arc<dyn DescriptionGenerator>,
    /// Compiled HTML templates.
    pub views: Arc<Views>,
    pub clock: Clock,
}

impl AppState {
    /// Wire the default collaborators from `config` around an open store.
    pub fn new(config: Config, slots: SqliteStore) -> Result<Self, minijinja::Error> {
        let describer = GeminiGenerator::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        );
        Self::with_describer(config, slots, Arc::new(describer))
    }

    pub fn with_describer(
        config: Config,
        slots: SqliteStore,
        describer: Arc<dyn DescriptionGenerator>,
    ) -> Result<Self, minijinja::Error> {
        let materials = MaterialStore::new(slots, config.collection_key.clone(), config.duplicate_ids);
        let gate = AdminGate::new(StaticCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        ));
        Ok(Self {
            config: Arc::new(config),
            materials: Arc::new(materials),
            gate: Arc::new(gate),
            describer,
            views: Arc::new(Views::new()?),
            clock: system_clock,
        })
    }
}
