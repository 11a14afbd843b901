//! Conversation session state
//!
//! One `ConversationSession` per session id, owned and mutated only by the
//! dialogue engine. The hosting transport keys sessions by an opaque id and
//! serializes turns per session; the engine itself holds no global state.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Sentinel user id used when the session store supplies none
pub const ANONYMOUS_USER: &str = "anonymous";

/// Flow state flag for the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Idle / browsing
    #[default]
    Idle,
    /// Items just added, asking to continue or check out
    AwaitingMore,
    /// Cart summarized, waiting for explicit confirm or cancel
    AwaitingConfirmation,
    /// Returning user with a non-empty cart, asking continue-or-clear
    HandlingExistingCart,
}

impl FlowState {
    /// Get state display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::AwaitingMore => "awaiting_more",
            FlowState::AwaitingConfirmation => "awaiting_confirmation",
            FlowState::HandlingExistingCart => "handling_existing_cart",
        }
    }
}

/// Per-session conversation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Opaque session identifier supplied by the transport
    pub session_id: String,
    /// Stable user identifier, if the transport knows one
    pub user_id: Option<String>,
    /// Pending order
    pub cart: Cart,
    /// Current flow state
    pub state: FlowState,
    /// Single item awaiting a quantity, if any
    pub pending_item: Option<String>,
    /// Set whenever the session changed this turn, for store write-back
    pub dirty: bool,
}

impl ConversationSession {
    /// Create a fresh session with an empty cart
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: None,
            cart: Cart::new(),
            state: FlowState::Idle,
            pending_item: None,
            dirty: false,
        }
    }

    /// User id with the anonymous fallback applied
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(ANONYMOUS_USER)
    }

    /// Mark the session as changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drop all order state and return to idle
    pub fn reset_order(&mut self) {
        self.cart.clear();
        self.pending_item = None;
        self.state = FlowState::Idle;
        self.mark_dirty();
    }
}
