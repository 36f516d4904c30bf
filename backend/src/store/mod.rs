//! Data access for the ordering portal
//!
//! The engines never touch storage directly: they consume this trait and
//! recompute from full listings on every request.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use shared::models::{NewOrder, Order, StockEntry};

/// Storage-layer failure, propagated unchanged through the engines.
///
/// Retries, if any, belong to the implementation behind the trait.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed stored record: {0}")]
    Malformed(String),
}

/// Collaborator supplying stock and order listings and persisting new
/// orders.
///
/// Concurrency note: the portal performs no admission arbitration of its
/// own, so two concurrent `append_order` callers can both have observed
/// enough free stock. An implementation backed by a real store should
/// re-validate availability inside the same transaction that inserts, or
/// serialize admissions upstream.
#[async_trait]
pub trait PortalStore: Send + Sync {
    /// All recorded stock deliveries, in no particular order.
    async fn list_stock_entries(&self) -> Result<Vec<StockEntry>, StoreError>;

    /// All orders, any status, in no particular order.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Persist a validated order, assigning its id and server timestamp.
    async fn append_order(&self, order: NewOrder) -> Result<Order, StoreError>;
}
