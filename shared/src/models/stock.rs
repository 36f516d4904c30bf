//! Incoming stock deliveries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recorded incoming stock delivery.
///
/// Entries are written by the stock-intake side of the portal and are
/// immutable afterwards; the allocation engines only ever read and sum them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Day the delivery becomes available for shipping.
    pub delivery_date: NaiveDate,

    /// Delivered quantity in whole kilograms (non-negative).
    pub incoming_kg: i64,

    /// Free-form note from the intake sheet.
    pub notes: Option<String>,
}

impl StockEntry {
    pub fn new(delivery_date: NaiveDate, incoming_kg: i64) -> Self {
        Self {
            delivery_date,
            incoming_kg,
            notes: None,
        }
    }
}
