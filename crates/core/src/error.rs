//! Workspace-wide error types

use thiserror::Error;

/// Top-level error aggregating subsystem failures
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
