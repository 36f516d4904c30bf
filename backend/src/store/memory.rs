//! In-memory store used by tests and demo embeddings

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::models::{NewOrder, Order, StockEntry};

use super::{PortalStore, StoreError};

/// A [`PortalStore`] keeping both collections in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    stock: RwLock<Vec<StockEntry>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with fixtures.
    pub fn with_data(stock: Vec<StockEntry>, orders: Vec<Order>) -> Self {
        Self {
            stock: RwLock::new(stock),
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl PortalStore for InMemoryStore {
    async fn list_stock_entries(&self) -> Result<Vec<StockEntry>, StoreError> {
        Ok(self.stock.read().await.clone())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.clone())
    }

    async fn append_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let order = Order {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            customer_id: order.customer_id,
            ordered_by: order.ordered_by,
            customer_name: order.customer_name,
            quantity_kg: order.quantity_kg,
            status: order.status,
            shipping_date: order.shipping_date,
            notes: order.notes,
        };
        self.orders.write().await.push(order.clone());
        Ok(order)
    }
}
