//! Session store
//!
//! Sessions are keyed by the transport's opaque session id. A missing
//! session is always treated as a fresh one with an empty cart, never an
//! error. Write-back happens when the engine marked the session dirty.

use std::collections::HashMap;

use parking_lot::RwLock;

use order_agent_core::ConversationSession;

/// Get/put access to per-session conversation state
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<ConversationSession>;
    fn put(&self, session: ConversationSession);
    fn remove(&self, session_id: &str);

    /// Existing session, or a fresh one for this id.
    fn get_or_create(&self, session_id: &str) -> ConversationSession {
        self.get(session_id)
            .unwrap_or_else(|| ConversationSession::new(session_id))
    }
}

/// In-memory session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, ConversationSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<ConversationSession> {
        self.sessions.read().get(session_id).cloned()
    }

    fn put(&self, mut session: ConversationSession) {
        session.dirty = false;
        self.sessions
            .write()
            .insert(session.session_id.clone(), session);
    }

    fn remove(&self, session_id: &str) {
        if self.sessions.write().remove(session_id).is_some() {
            tracing::debug!(session_id, "Removed session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_agent_core::FlowState;

    #[test]
    fn test_missing_session_is_fresh() {
        let store = InMemorySessionStore::new();
        let session = store.get_or_create("s-1");
        assert_eq!(session.session_id, "s-1");
        assert!(session.cart.is_empty());
        assert_eq!(session.state, FlowState::Idle);
    }

    #[test]
    fn test_put_and_get_roundtrip() {
        let store = InMemorySessionStore::new();

        let mut session = ConversationSession::new("s-2");
        session.cart.add("burger", 1, 200);
        session.state = FlowState::AwaitingMore;
        session.mark_dirty();
        store.put(session);

        let loaded = store.get("s-2").unwrap();
        assert_eq!(loaded.cart.len(), 1);
        assert_eq!(loaded.state, FlowState::AwaitingMore);
        assert!(!loaded.dirty);
    }

    #[test]
    fn test_remove() {
        let store = InMemorySessionStore::new();
        store.put(ConversationSession::new("s-3"));
        assert_eq!(store.count(), 1);

        store.remove("s-3");
        assert!(store.get("s-3").is_none());
    }
}
