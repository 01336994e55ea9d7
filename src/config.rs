use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::RankingLimits;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub firestore: FirestoreSettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default = "default_firestore_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            endpoint: default_firestore_endpoint(),
            project_id: None,
            database_id: default_database_id(),
            collection: default_collection(),
            api_key: None,
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FirestoreSettings {
    /// Project id, treating a blank value as not configured
    pub fn configured_project(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

fn default_firestore_endpoint() -> String { "https://firestore.googleapis.com/v1".to_string() }
fn default_database_id() -> String { "(default)".to_string() }
fn default_collection() -> String { "users".to_string() }
fn default_page_size() -> u32 { 300 }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Serve the built-in demo population instead of polling
    #[serde(default)]
    pub seed_demo: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            seed_demo: false,
        }
    }
}

fn default_refresh_interval_secs() -> u64 { 15 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            l1_cache_size: default_l1_cache_size(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 { 300 }
fn default_l1_cache_size() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            trending_limit: default_trending_limit(),
            recommendation_limit: default_recommendation_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl From<&RankingSettings> for RankingLimits {
    fn from(settings: &RankingSettings) -> Self {
        Self {
            trending: settings.trending_limit,
            recommendations: settings.recommendation_limit,
            max: settings.max_limit,
        }
    }
}

fn default_trending_limit() -> usize { 5 }
fn default_recommendation_limit() -> usize { 3 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLSWAP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SKILLSWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the conventional document database variables on top of the config
///
/// FIRESTORE_PROJECT_ID and FIRESTORE_API_KEY win over file values so
/// deployments can keep credentials out of config files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    apply_overrides(
        settings,
        env::var("FIRESTORE_PROJECT_ID").ok(),
        env::var("FIRESTORE_API_KEY").ok(),
    )
}

/// Blank values (`FIRESTORE_PROJECT_ID=` in a .env file) leave the config untouched
fn apply_overrides(
    settings: Config,
    project_id: Option<String>,
    api_key: Option<String>,
) -> Result<Config, ConfigError> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let mut builder = Config::builder().add_source(settings);

    if let Some(project_id) = present(project_id) {
        builder = builder.set_override("firestore.project_id", project_id)?;
    }
    if let Some(api_key) = present(api_key) {
        builder = builder.set_override("firestore.api_key", api_key)?;
    }

    builder.build()
}
