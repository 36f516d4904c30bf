//! Earliest-ship-date search for a requested quantity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::models::{Order, StockEntry};

use crate::config::PortalConfig;
use crate::error::{AppError, AppResult};
use crate::services::calendar;
use crate::services::periods;

/// Outcome of an availability check.
///
/// `shipping_date` absent means the request cannot be satisfied anywhere on
/// the timeline; `available_kg` then carries the best quantity the caller
/// could still ask for, so the portal can suggest an alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub shipping_date: Option<NaiveDate>,
    pub available_kg: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Walks the period table for the first window able to carry a new order.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    config: PortalConfig,
}

impl AvailabilityEngine {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    /// Earliest weekday on which `requested_kg` can ship, at or after the
    /// minimum order date.
    ///
    /// The date, when present, is always a weekday at or after the minimum
    /// order date, drawn from a period whose free stock covers the request
    /// at the time of computation.
    pub fn first_available_date(
        &self,
        stock: &[StockEntry],
        orders: &[Order],
        requested_kg: i64,
        today: NaiveDate,
    ) -> AppResult<AvailabilityResult> {
        if requested_kg <= 0 {
            return Err(AppError::validation(
                "requested_kg",
                "Requested quantity must be positive",
                "ปริมาณที่ขอต้องเป็นค่าบวก",
            ));
        }

        let min_date = calendar::minimum_order_date(today, self.config.lead_time_business_days);
        let periods = periods::build_periods(stock, orders);
        if periods.is_empty() {
            return Ok(AvailabilityResult {
                shipping_date: None,
                available_kg: 0,
                message: Some("No incoming stock recorded".to_string()),
            });
        }

        let frees = periods::effective_free(&periods, self.config.consumption_policy, orders);

        let mut best_available = 0i64;
        for (period, free) in periods.iter().zip(frees.iter().copied()) {
            best_available = best_available.max(free);
            // Window already closed before the earliest permissible date.
            if period.end_date.map_or(false, |end| end < min_date) {
                continue;
            }
            if free < requested_kg {
                continue;
            }
            if let Some(date) = periods::first_weekday_within(period, min_date) {
                return Ok(AvailabilityResult {
                    shipping_date: Some(date),
                    available_kg: free,
                    message: None,
                });
            }
        }

        Ok(AvailabilityResult {
            shipping_date: None,
            available_kg: best_available,
            message: Some(format!(
                "Insufficient stock: requested {} kg, at most {} kg available",
                requested_kg, best_available
            )),
        })
    }
}
