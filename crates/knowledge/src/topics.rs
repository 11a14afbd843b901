//! Topic registry and data-file loading
//!
//! Topics are independent TF-IDF indexes keyed by id ("faq", "sales", ...).
//! Data files are line-oriented: one `question|answer` per line. Blank lines
//! and lines without the delimiter are skipped, as is a leading UTF-8 BOM.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::index::{KnowledgeHit, TfIdfIndex};
use crate::KnowledgeError;

const DELIMITER: char = '|';

/// Per-topic collection of TF-IDF indexes
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    topics: HashMap<String, TfIdfIndex>,
}

impl KnowledgeBase {
    /// Empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a topic from (question, answer) pairs.
    ///
    /// Questions are lowercased on the way in; answers are kept raw.
    pub fn insert_topic(&mut self, topic_id: &str, pairs: Vec<(String, String)>) {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(q, a)| (q.to_lowercase(), a))
            .collect();

        tracing::info!(topic = topic_id, questions = pairs.len(), "Indexed knowledge topic");
        self.topics.insert(topic_id.to_string(), TfIdfIndex::build(&pairs));
    }

    /// Load a topic from a `question|answer` data file.
    ///
    /// A missing or unreadable file degrades to an empty topic rather than
    /// failing startup.
    pub fn insert_topic_from_file<P: AsRef<Path>>(&mut self, topic_id: &str, path: P) {
        match load_topic_file(&path) {
            Ok(pairs) => self.insert_topic(topic_id, pairs),
            Err(e) => {
                tracing::warn!(
                    topic = topic_id,
                    path = %path.as_ref().display(),
                    error = %e,
                    "Could not load knowledge topic, registering it empty"
                );
                self.insert_topic(topic_id, Vec::new());
            }
        }
    }

    /// Best answer for a normalized query against one topic.
    ///
    /// Unknown or empty topics report no match.
    pub fn query(&self, topic_id: &str, text: &str) -> Option<KnowledgeHit<'_>> {
        match self.topics.get(topic_id) {
            Some(index) => index.query(text),
            None => {
                tracing::debug!(topic = topic_id, "Query against unregistered topic");
                None
            }
        }
    }

    /// Registered topic ids
    pub fn topic_ids(&self) -> Vec<&str> {
        self.topics.keys().map(String::as_str).collect()
    }
}

/// Parse a `question|answer` data file into pairs.
///
/// Blank lines and lines missing the delimiter are skipped.
pub fn load_topic_file<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>, KnowledgeError> {
    let content = fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(DELIMITER) {
            Some((question, answer)) => {
                pairs.push((question.trim().to_string(), answer.trim().to_string()));
            }
            None => {
                tracing::debug!(line, "Skipping knowledge line without delimiter");
            }
        }
    }

    Ok(pairs)
}
