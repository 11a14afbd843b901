//! Order persistence
//!
//! A confirmed cart is appended as one timestamped row per line. The engine
//! calls `record` at most once per confirmed cart; a failure leaves the cart
//! in the session so the user can retry confirmation.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

use order_agent_core::Cart;

use crate::PersistenceError;

const CREATE_ORDERS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS orders (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id TEXT NOT NULL,
  item TEXT NOT NULL,
  quantity INTEGER NOT NULL CHECK (quantity > 0),
  price INTEGER NOT NULL,
  total INTEGER NOT NULL,
  order_time TEXT NOT NULL
);
";

/// One persisted order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub user_id: String,
    pub item: String,
    pub quantity: u32,
    pub unit_price: u32,
    pub line_total: u64,
    pub order_time: DateTime<Utc>,
}

/// Durable sink for confirmed carts
pub trait OrderStore: Send + Sync {
    /// Append every line of the cart under the given user id.
    fn record(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError>;
}

/// SQLite-backed order store
pub struct SqliteOrderStore {
    conn: Mutex<Connection>,
}

impl SqliteOrderStore {
    /// Open (or create) the orders database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_ORDERS_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_ORDERS_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// All persisted lines for one user, oldest first.
    pub fn orders_for_user(&self, user_id: &str) -> Result<Vec<OrderRecord>, PersistenceError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT user_id, item, quantity, price, total, order_time
             FROM orders WHERE user_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let order_time: String = row.get(5)?;
            Ok(OrderRecord {
                user_id: row.get(0)?,
                item: row.get(1)?,
                quantity: row.get(2)?,
                unit_price: row.get(3)?,
                line_total: row.get(4)?,
                order_time: order_time
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

impl OrderStore for SqliteOrderStore {
    fn record(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let now = Utc::now();

        for line in cart.lines() {
            tx.execute(
                "INSERT INTO orders (user_id, item, quantity, price, total, order_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user_id,
                    line.item,
                    line.quantity,
                    line.unit_price,
                    line.line_total,
                    now.to_rfc3339(),
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!(user_id, lines = cart.len(), total = cart.grand_total(), "Order recorded");
        Ok(())
    }
}

/// In-memory order store for tests and ephemeral deployments
#[derive(Default)]
pub struct InMemoryOrderStore {
    records: Mutex<Vec<OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<OrderRecord> {
        self.records.lock().clone()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn record(&self, user_id: &str, cart: &Cart) -> Result<(), PersistenceError> {
        let now = Utc::now();
        let mut records = self.records.lock();
        for line in cart.lines() {
            records.push(OrderRecord {
                user_id: user_id.to_string(),
                item: line.item.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
                order_time: now,
            });
        }
        Ok(())
    }
}

/// Order store that always fails, for exercising retry behaviour
#[derive(Default)]
pub struct FailingOrderStore;

impl OrderStore for FailingOrderStore {
    fn record(&self, _user_id: &str, _cart: &Cart) -> Result<(), PersistenceError> {
        Err(PersistenceError::Store("order sink unavailable".to_string()))
    }
}
