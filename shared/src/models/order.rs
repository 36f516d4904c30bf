//! Customer orders and their lifecycle status

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a customer order.
///
/// The status column is open-ended in the underlying data store; anything
/// unrecognized deserializes as [`OrderStatus::Unknown`] instead of failing
/// the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Reserved,
    WaitingPo,
    InvoiceSent,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Reserved => "reserved",
            OrderStatus::WaitingPo => "waiting_po",
            OrderStatus::InvoiceSent => "invoice_sent",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// Settled orders no longer consume stock.
    ///
    /// This is the single classification table for the whole portal: an
    /// invoiced order still holds its stock claim until it actually ships,
    /// and an unrecognized status keeps its claim rather than silently
    /// releasing stock.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            OrderStatus::Shipped | OrderStatus::Delivered | OrderStatus::Cancelled
        )
    }

    pub fn is_pending(&self) -> bool {
        !self.is_settled()
    }
}

/// A customer order as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub customer_id: Uuid,
    pub ordered_by: String,
    pub customer_name: String,

    /// Ordered quantity in whole kilograms, a multiple of the sack size.
    pub quantity_kg: i64,

    pub status: OrderStatus,

    /// Planned shipping date; absent while the order is still unscheduled.
    pub shipping_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

/// A validated order awaiting persistence.
///
/// The store assigns `id` and the server-side `created_at` timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub ordered_by: String,
    pub customer_name: String,
    pub quantity_kg: i64,
    pub status: OrderStatus,
    pub shipping_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
