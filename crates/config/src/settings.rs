//! Main settings module

use std::collections::HashMap;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Data file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Dialogue engine tuning
    #[serde(default)]
    pub agent: AgentSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.agent.intent_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "agent.intent_threshold".to_string(),
                message: "must be within 0-100".to_string(),
            });
        }

        if !(0.0..=100.0).contains(&self.agent.fuzzy_item_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "agent.fuzzy_item_threshold".to_string(),
                message: "must be within 0-100".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.agent.knowledge_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "agent.knowledge_threshold".to_string(),
                message: "must be within 0-1".to_string(),
            });
        }

        if self.agent.intent_threshold < 50.0 {
            tracing::warn!(
                threshold = self.agent.intent_threshold,
                "Intent threshold is very permissive, unrelated words may map to intents"
            );
        }

        if self.agent.knowledge_threshold > 0.9 {
            tracing::warn!(
                threshold = self.agent.knowledge_threshold,
                "Knowledge threshold is close to 1.0, most answers will be rejected"
            );
        }

        Ok(())
    }
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Menu JSON document (flat or nested categories)
    #[serde(default = "default_menu_file")]
    pub menu_file: String,

    /// Directory of `<topic>.txt` knowledge files
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: String,

    /// SQLite database for confirmed orders
    #[serde(default = "default_orders_db")]
    pub orders_db: String,
}

fn default_menu_file() -> String {
    "data/menu.json".to_string()
}
fn default_knowledge_dir() -> String {
    "data/knowledge".to_string()
}
fn default_orders_db() -> String {
    "orders.db".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            menu_file: default_menu_file(),
            knowledge_dir: default_knowledge_dir(),
            orders_db: default_orders_db(),
        }
    }
}

/// Dialogue engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Intent acceptance threshold on the 0-100 fuzzy scale
    #[serde(default = "default_intent_threshold")]
    pub intent_threshold: f32,

    /// Fuzzy menu-item match threshold on the 0-100 scale
    #[serde(default = "default_fuzzy_item_threshold")]
    pub fuzzy_item_threshold: f32,

    /// Knowledge-base acceptance threshold on the 0-1 cosine scale
    #[serde(default = "default_knowledge_threshold")]
    pub knowledge_threshold: f32,

    /// Topic consulted for fallback answers
    #[serde(default = "default_knowledge_topic")]
    pub knowledge_topic: String,

    /// Whole-token typo/synonym rewrites applied during normalization
    #[serde(default)]
    pub rewrites: HashMap<String, String>,
}

fn default_intent_threshold() -> f32 {
    70.0
}
fn default_fuzzy_item_threshold() -> f32 {
    85.0
}
fn default_knowledge_threshold() -> f32 {
    0.30
}
fn default_knowledge_topic() -> String {
    "faq".to_string()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            intent_threshold: default_intent_threshold(),
            fuzzy_item_threshold: default_fuzzy_item_threshold(),
            knowledge_threshold: default_knowledge_threshold(),
            knowledge_topic: default_knowledge_topic(),
            rewrites: HashMap::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (ORDER_AGENT__ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env_name}")).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("ORDER_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.agent.intent_threshold, 70.0);
        assert_eq!(settings.agent.knowledge_topic, "faq");
        assert_eq!(settings.data.menu_file, "data/menu.json");
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.agent.knowledge_threshold = 1.5; // Out of range
        assert!(settings.validate().is_err());

        settings.agent.knowledge_threshold = 0.35;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unusual_thresholds_warn_but_validate() {
        let mut settings = Settings::default();
        settings.agent.intent_threshold = 30.0;
        settings.agent.knowledge_threshold = 0.95;
        assert!(settings.validate().is_ok());
    }
}
