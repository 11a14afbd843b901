//! Core types for the ordering agent
//!
//! This crate provides foundational types used across all other crates:
//! - Cart and cart line types
//! - Intent and flow state enums
//! - Conversation session state
//! - Reply types
//! - Error types

pub mod cart;
pub mod error;
pub mod intent;
pub mod reply;
pub mod session;

pub use cart::{Cart, CartLine};
pub use error::{Error, Result};
pub use intent::UserIntent;
pub use reply::{Reply, ReplyHint};
pub use session::{ConversationSession, FlowState, ANONYMOUS_USER};
