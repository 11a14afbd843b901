//! Order entity extraction
//!
//! Scans normalized text for menu-item mentions and their quantities.
//! Two passes: exact token-run matching with a preceding quantity token,
//! then a fuzzy fallback for leftover tokens to absorb typos and plurals.
//! Duplicates across passes are not merged here; aggregation into cart
//! lines is the state machine's job.

use order_agent_catalog::MenuCatalog;
use order_agent_text_processing::{char_ratio, parse_quantity};

/// Minimum token length considered by the fuzzy fallback pass
const MIN_FUZZY_TOKEN_LEN: usize = 4;

/// One (item, quantity) mention found in a turn's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedOrderItem {
    /// Canonical catalog item name
    pub item: String,
    /// Quantity, defaulting to 1
    pub quantity: u32,
    /// Whether the quantity came from the text rather than the default
    pub explicit_quantity: bool,
}

/// Menu-mention extractor
#[derive(Debug, Clone)]
pub struct OrderExtractor {
    /// Fuzzy acceptance threshold on the 0-100 scale
    fuzzy_threshold: f32,
}

impl OrderExtractor {
    pub fn new(fuzzy_threshold: f32) -> Self {
        Self { fuzzy_threshold }
    }

    /// Extract mentions from normalized text, in left-to-right order of the
    /// exact pass followed by the fuzzy pass.
    pub fn extract(&self, text: &str, catalog: &MenuCatalog) -> Vec<ExtractedOrderItem> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() || catalog.is_empty() {
            return Vec::new();
        }

        // Item names tokenized, longest name first so runs are maximal;
        // the sort is stable, so equal lengths keep catalog order.
        let mut names: Vec<(Vec<&str>, &str)> = catalog
            .iter_flat()
            .map(|(_, name, _)| (name.split_whitespace().collect(), name))
            .collect();
        names.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut consumed = vec![false; tokens.len()];
        let mut items = Vec::new();

        // Pass 1: exact token runs with an optional preceding quantity
        let mut i = 0;
        while i < tokens.len() {
            if consumed[i] {
                i += 1;
                continue;
            }

            let mut advanced = false;
            for (name_tokens, name) in &names {
                let len = name_tokens.len();
                if len == 0 || i + len > tokens.len() {
                    continue;
                }
                if tokens[i..i + len] != name_tokens[..] {
                    continue;
                }

                let mut quantity = 1;
                let mut explicit = false;
                if i > 0 && !consumed[i - 1] {
                    // Malformed number tokens simply leave the default of 1
                    if let Some(q) = parse_quantity(tokens[i - 1]) {
                        quantity = q;
                        explicit = true;
                        consumed[i - 1] = true;
                    }
                }

                for slot in &mut consumed[i..i + len] {
                    *slot = true;
                }
                items.push(ExtractedOrderItem {
                    item: (*name).to_string(),
                    quantity,
                    explicit_quantity: explicit,
                });

                i += len;
                advanced = true;
                break;
            }

            if !advanced {
                i += 1;
            }
        }

        // Pass 2: fuzzy fallback over leftover tokens
        for (idx, token) in tokens.iter().enumerate() {
            if consumed[idx] || token.len() < MIN_FUZZY_TOKEN_LEN {
                continue;
            }

            let mut best_name: Option<&str> = None;
            let mut best_score = 0.0f32;
            for (_, name, _) in catalog.iter_flat() {
                let score = char_ratio(token, name);
                // Strictly greater keeps the first catalog item on ties
                if score > best_score {
                    best_score = score;
                    best_name = Some(name);
                }
            }

            if best_score > self.fuzzy_threshold {
                if let Some(name) = best_name {
                    tracing::debug!(token, item = name, score = best_score, "Fuzzy item match");
                    items.push(ExtractedOrderItem {
                        item: name.to_string(),
                        quantity: 1,
                        explicit_quantity: false,
                    });
                }
            }
        }

        items
    }
}
