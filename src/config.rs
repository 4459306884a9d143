use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    /// Storage key the draft record lives under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Quiet window between the last edit and the autosave write.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
    /// Persisted drafts older than this are discarded on load.
    #[serde(default = "default_draft_max_age_days")]
    pub draft_max_age_days: i64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            draft_max_age_days: default_draft_max_age_days(),
        }
    }
}

fn default_storage_key() -> String {
    "subscription-wizard".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    500
}

fn default_draft_max_age_days() -> i64 {
    7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALSUB__STORAGE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("storage.url", "sqlite:mealsub.db")?
            .set_default("storage.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALSUB")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("storage.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.max_connections < 1 {
            return Err("storage.max_connections must be at least 1".to_string());
        }
        if self.wizard.storage_key.trim().is_empty() {
            return Err("wizard.storage_key must not be empty".to_string());
        }
        if self.wizard.autosave_debounce_ms > 60_000 {
            return Err("wizard.autosave_debounce_ms must be at most 60000".to_string());
        }
        if self.wizard.draft_max_age_days < 1 {
            return Err("wizard.draft_max_age_days must be at least 1".to_string());
        }
        Ok(())
    }
}
