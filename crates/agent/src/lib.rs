//! Conversational ordering agent
//!
//! Features:
//! - Fuzzy keyword intent classification
//! - Menu-entity extraction with quantities and typo tolerance
//! - Per-session flow state machine over the cart
//! - Knowledge-base fallback for open questions
//!
//! The engine is read-only shared state: per-session mutation happens only
//! through the `ConversationSession` passed into `handle_turn`, and every
//! turn completes synchronously.

pub mod classifier;
pub mod engine;
pub mod extractor;

pub use classifier::IntentClassifier;
pub use engine::{render_cart_summary, DialogueEngine, EngineConfig};
pub use extractor::{ExtractedOrderItem, OrderExtractor};
