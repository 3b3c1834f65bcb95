use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::{PinPolicy, DEFAULT_CANDIDATE_LIMIT};
use crate::models::DEFAULT_CITY;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub pinning: PinningSettings,
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
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Shared L2 cache; the in-process cache is used alone when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            candidate_limit: default_candidate_limit(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_city() -> String { DEFAULT_CITY.to_string() }
fn default_candidate_limit() -> usize { DEFAULT_CANDIDATE_LIMIT }
fn default_limit() -> u16 { 100 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct PinningSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Lowercase names, slugs or normalized names of the promoted school
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub promotion: PromotionSettings,
}

impl Default for PinningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            candidates: vec![],
            promotion: PromotionSettings::default(),
        }
    }
}

impl PinningSettings {
    pub fn policy(&self) -> PinPolicy {
        if self.enabled {
            PinPolicy::new(&self.candidates)
        } else {
            PinPolicy::disabled()
        }
    }
}

/// Display fields attached to the pinned school in responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromotionSettings {
    pub registration_url: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub hero_image: Option<String>,
}

fn default_true() -> bool { true }

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
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SCHOOL_FINDER)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SCHOOL_FINDER__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SCHOOL_FINDER")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("pinning.candidates")
        .with_list_parse_key("pinning.promotion.documents")
        .try_parsing(true)
}

/// Let the conventional `DATABASE_URL` override `database.url`
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => return Ok(settings),
    };

    Config::builder()
        .add_source(settings)
        .set_override("database.url", database_url)?
        .build()
}
