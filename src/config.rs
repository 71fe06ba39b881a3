use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::{ScoringPolicy, DEFAULT_PREFERENCES};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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
pub struct CatalogSettings {
    pub path: String,
    /// Snapshot lifetime; unset or zero keeps it until explicitly refreshed
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_preferences")]
    pub preferences: Vec<String>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            preferences: default_preferences(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_preference_bonus")]
    pub preference: i32,
    #[serde(default = "default_type_bonus")]
    pub venue_type: i32,
    #[serde(default = "default_zip_bonus")]
    pub zip: i32,
    #[serde(default = "default_budget_exact_bonus")]
    pub budget_exact: i32,
    #[serde(default = "default_budget_step_penalty")]
    pub budget_step: i32,
    #[serde(default = "default_over_budget_penalty")]
    pub over_budget_penalty: i32,
    #[serde(default = "default_score_floor")]
    pub score_floor: i32,
    #[serde(default = "default_result_limit")]
    pub limit: usize,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            preference: default_preference_bonus(),
            venue_type: default_type_bonus(),
            zip: default_zip_bonus(),
            budget_exact: default_budget_exact_bonus(),
            budget_step: default_budget_step_penalty(),
            over_budget_penalty: default_over_budget_penalty(),
            score_floor: default_score_floor(),
            limit: default_result_limit(),
        }
    }
}

impl WeightsConfig {
    pub fn to_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            preference_bonus: self.preference,
            type_bonus: self.venue_type,
            zip_bonus: self.zip,
            budget_exact_bonus: self.budget_exact,
            budget_step_penalty: self.budget_step,
            over_budget_penalty: self.over_budget_penalty,
            score_floor: self.score_floor,
            limit: self.limit,
        }
    }
}

fn default_preference_bonus() -> i32 { 50 }
fn default_type_bonus() -> i32 { 30 }
fn default_zip_bonus() -> i32 { 20 }
fn default_budget_exact_bonus() -> i32 { 15 }
fn default_budget_step_penalty() -> i32 { 5 }
fn default_over_budget_penalty() -> i32 { 1000 }
fn default_score_floor() -> i32 { -100 }
fn default_result_limit() -> usize { 3 }

fn default_preferences() -> Vec<String> {
    DEFAULT_PREFERENCES.iter().map(|p| p.to_string()).collect()
}

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

impl LoggingSettings {
    /// `LOG_LEVEL` / `LOG_FORMAT` win over the configured values when set
    pub fn with_env_overrides(self, level: Option<String>, format: Option<String>) -> Self {
        Self {
            level: level.filter(|l| !l.is_empty()).unwrap_or(self.level),
            format: format.filter(|f| !f.is_empty()).unwrap_or(self.format),
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
    /// 4. Environment variables (prefixed with PLUR__)
    /// 5. CATALOG_PATH, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PLUR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PLUR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_catalog_override(settings, std::env::var("CATALOG_PATH").ok())?.try_deserialize()
    }

    /// Scoring policy built from the configured weights
    ///
    /// Weights that differ from the canonical policy are accepted but logged,
    /// since two scoring variants have existed for this catalog.
    pub fn scoring_policy(&self) -> ScoringPolicy {
        let policy = self.scoring.weights.to_policy();
        if !policy.is_canonical() {
            tracing::warn!(
                "Configured scoring weights diverge from the canonical policy: {:?} (canonical: {:?})",
                policy,
                ScoringPolicy::default()
            );
        }
        policy
    }
}

/// Point the catalog at `CATALOG_PATH` when that variable is set
fn apply_catalog_override(settings: Config, catalog_path: Option<String>) -> Result<Config, ConfigError> {
    match catalog_path {
        Some(path) => Config::builder()
            .add_source(settings)
            .set_override("catalog.path", path)?
            .build(),
        None => Ok(settings),
    }
}
