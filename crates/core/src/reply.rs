//! Turn reply types
//!
//! Each turn produces a plain text reply plus an optional display hint that
//! transports may render as channel-specific controls (confirmation buttons,
//! a menu card, and so on).

use serde::{Deserialize, Serialize};

/// Display hint accompanying a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplyHint {
    /// Plain text, no special rendering
    #[default]
    None,
    /// Reply contains the menu listing
    ShowMenu,
    /// Reply contains a cart summary
    ShowCart,
    /// Reply asks for an explicit confirm/cancel
    ShowConfirmation,
}

/// Structured reply for one conversational turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// User-visible text
    pub text: String,
    /// Rendering hint for the transport
    pub hint: ReplyHint,
}

impl Reply {
    /// Plain text reply with no hint
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: ReplyHint::None,
        }
    }

    /// Reply with a display hint
    pub fn with_hint(text: impl Into<String>, hint: ReplyHint) -> Self {
        Self {
            text: text.into(),
            hint,
        }
    }
}
