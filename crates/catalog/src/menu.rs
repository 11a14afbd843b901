//! Menu catalog types and JSON loading
//!
//! Accepts either the flat `{"burger": 200}` shape or nested categories
//! `{"mains": {"burger": 200}}`. Item names are canonicalized to lowercase
//! and must be unique across the whole catalog; lookup is flat by name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CatalogError;

/// Category name used when the source is a flat item map
const FLAT_CATEGORY: &str = "menu";

/// One priced menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Canonical lowercase item name
    pub name: String,
    /// Unit price in whole currency units
    pub price: u32,
}

/// Immutable, process-wide price list
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    /// Categories in source order, items in source order within each
    categories: Vec<(String, Vec<MenuItem>)>,
    /// Flat item name -> price index
    by_name: HashMap<String, u32>,
}

impl MenuCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (category, items) pairs, dropping duplicate item names.
    pub fn from_categories(categories: Vec<(String, Vec<(String, u32)>)>) -> Self {
        let mut catalog = Self::new();

        for (category, items) in categories {
            let mut kept = Vec::with_capacity(items.len());
            for (name, price) in items {
                let name = name.to_lowercase();
                if catalog.by_name.contains_key(&name) {
                    tracing::warn!(item = %name, "Duplicate menu item name, keeping the first");
                    continue;
                }
                catalog.by_name.insert(name.clone(), price);
                kept.push(MenuItem { name, price });
            }
            catalog.categories.push((category, kept));
        }

        catalog
    }

    /// Parse a menu document, auto-detecting flat vs. nested shape.
    pub fn from_json_value(value: &Value) -> Result<Self, CatalogError> {
        let map = value
            .as_object()
            .ok_or_else(|| CatalogError::InvalidData("menu root must be an object".to_string()))?;

        let nested = map.values().all(Value::is_object) && !map.is_empty();

        let mut categories = Vec::new();
        if nested {
            for (category, items) in map {
                let items = items
                    .as_object()
                    .ok_or_else(|| CatalogError::InvalidData(format!("category {category} is not an object")))?;
                categories.push((category.clone(), parse_items(items)?));
            }
        } else {
            categories.push((FLAT_CATEGORY.to_string(), parse_items(map)?));
        }

        Ok(Self::from_categories(categories))
    }

    /// Load a menu JSON file.
    ///
    /// Missing or malformed sources degrade to an empty catalog; replies
    /// that depend on the menu then say it is unavailable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), items = catalog.len(), "Loaded menu catalog");
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not load menu, using empty catalog");
                Self::new()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| CatalogError::InvalidData(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Number of items across all categories
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the catalog holds no items
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Unit price for an item name (case-insensitive)
    pub fn price_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// First catalog item whose name appears as a substring of the text.
    ///
    /// Substring containment tolerates plurals and phrasing around the name,
    /// at the known cost of false positives on very short item names.
    pub fn find_mention(&self, text: &str) -> Option<(&str, u32)> {
        let text = text.to_lowercase();
        self.iter_flat()
            .find(|(_, name, _)| text.contains(name))
            .map(|(_, name, price)| (name, price))
    }

    /// Ordered (category, item, price) listing for display
    pub fn iter_flat(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.categories.iter().flat_map(|(category, items)| {
            items
                .iter()
                .map(move |item| (category.as_str(), item.name.as_str(), item.price))
        })
    }
}

fn parse_items(map: &serde_json::Map<String, Value>) -> Result<Vec<(String, u32)>, CatalogError> {
    let mut items = Vec::with_capacity(map.len());
    for (name, price) in map {
        let price = price
            .as_u64()
            .and_then(|p| u32::try_from(p).ok())
            .ok_or_else(|| {
                CatalogError::InvalidData(format!("item {name} has a non-integer price"))
            })?;
        items.push((name.clone(), price));
    }
    Ok(items)
}
