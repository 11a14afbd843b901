//! Configuration for the ordering agent
//!
//! Layered settings: `config/default` file, optional per-environment file,
//! then `ORDER_AGENT__`-prefixed environment variables.

pub mod settings;

pub use settings::{
    load_settings, AgentSettings, DataConfig, ObservabilityConfig, Settings,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
