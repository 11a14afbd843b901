//! Knowledge-base retrieval
//!
//! Features:
//! - Per-topic TF-IDF vector index over (question, answer) pairs
//! - Cosine-similarity nearest-neighbour query with stable argmax
//! - Line-format loader (`question|answer`) for topic data files
//!
//! The index always returns its best candidate plus score; the acceptance
//! threshold is the caller's decision.

pub mod index;
pub mod topics;

pub use index::{KnowledgeHit, TfIdfIndex};
pub use topics::{load_topic_file, KnowledgeBase};

use thiserror::Error;

/// Knowledge-base errors
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}
