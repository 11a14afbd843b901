//! User intent enumeration

use serde::{Deserialize, Serialize};

/// Discrete conversational purpose inferred from one utterance.
///
/// Derived fresh each turn by the classifier; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserIntent {
    /// User greeting ("hello", "hi")
    Greeting,
    /// User wants to see the menu
    MenuRequest,
    /// Explicit order confirmation
    Confirm,
    /// Negative / cancel / "done" response
    Cancel,
    /// Affirmative continuation ("yes", "more")
    AddMore,
    /// Gratitude
    Thanks,
    /// User wants to review the cart
    ViewCart,
    /// No intent cleared the acceptance threshold
    #[default]
    None,
}

impl UserIntent {
    /// Get intent display name
    pub fn display_name(&self) -> &'static str {
        match self {
            UserIntent::Greeting => "greeting",
            UserIntent::MenuRequest => "menu_request",
            UserIntent::Confirm => "confirm",
            UserIntent::Cancel => "cancel",
            UserIntent::AddMore => "add_more",
            UserIntent::Thanks => "thanks",
            UserIntent::ViewCart => "view_cart",
            UserIntent::None => "none",
        }
    }
}
