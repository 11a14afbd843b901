//! Persistence layer for the ordering agent
//!
//! Provides durable storage for:
//! - Confirmed orders (one timestamped row per cart line)
//! - Conversation sessions (in-memory reference store)
//!
//! The dialogue engine only sees the `OrderStore` and `SessionStore` traits;
//! hosting transports pick the implementation.

pub mod error;
pub mod orders;
pub mod sessions;

pub use error::PersistenceError;
pub use orders::{FailingOrderStore, InMemoryOrderStore, OrderRecord, OrderStore, SqliteOrderStore};
pub use sessions::{InMemorySessionStore, SessionStore};
