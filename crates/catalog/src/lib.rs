//! Menu catalog
//!
//! The price list behind the ordering flow: ordered categories of priced
//! items with a flat, name-keyed lookup. Loaded once at startup and
//! read-only thereafter; a missing or malformed source degrades to an empty
//! catalog instead of failing startup.

pub mod menu;

pub use menu::{MenuCatalog, MenuItem};

use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid menu data: {0}")]
    InvalidData(String),
}
