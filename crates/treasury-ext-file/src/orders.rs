//! In-memory order store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted and stamped with the curve rate at submission time.
    Submitted,
}

/// Order as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    /// Store-assigned identifier
    pub id: u64,
    /// Upper-cased term label as submitted
    pub term: String,
    /// Notional amount
    pub amount: Decimal,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Status
    pub status: OrderStatus,
    /// Curve rate for the term at submission, if the curve carried it
    pub rate_at_submission: Option<Decimal>,
}

/// Order fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Term label
    pub term: String,
    /// Notional amount
    pub amount: Decimal,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Curve rate for the term at submission
    pub rate_at_submission: Option<Decimal>,
}

/// In-memory order store.
pub struct InMemoryOrderStore {
    orders: DashMap<u64, StoredOrder>,
    next_id: AtomicU64,
}

impl InMemoryOrderStore {
    /// Create a new empty in-memory order store.
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a new order with status `SUBMITTED`.
    pub fn insert(&self, order: NewOrder) -> StoredOrder {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stored = StoredOrder {
            id,
            term: order.term.to_uppercase(),
            amount: order.amount,
            created_at: order.created_at,
            status: OrderStatus::Submitted,
            rate_at_submission: order.rate_at_submission,
        };
        self.orders.insert(id, stored.clone());
        stored
    }

    /// Get an order by ID.
    pub fn get(&self, id: u64) -> Option<StoredOrder> {
        self.orders.get(&id).map(|o| o.clone())
    }

    /// All orders, newest first.
    pub fn list(&self) -> Vec<StoredOrder> {
        let mut results: Vec<StoredOrder> = self.orders.iter().map(|r| r.value().clone()).collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        results
    }

    /// Number of stored orders.
    pub fn count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}
