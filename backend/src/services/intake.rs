//! Order intake validation
//!
//! Every check runs before an order is admitted; nothing here writes
//! storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{NewOrder, Order, OrderStatus, StockEntry};
use shared::validation;

use crate::config::PortalConfig;
use crate::error::{AppError, AppResult};
use crate::services::availability::AvailabilityEngine;
use crate::services::calendar;
use crate::services::periods;

/// Raw order payload as submitted by the portal form.
///
/// All fields optional; the validator decides what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: Option<Uuid>,
    pub ordered_by: Option<String>,
    pub customer_name: Option<String>,
    pub quantity_kg: Option<i64>,

    /// Requested shipping date in any accepted format; leave absent to let
    /// the portal pick the earliest available date.
    pub shipping_date: Option<String>,

    pub notes: Option<String>,
}

/// Validates drafts against the current stock and order books.
#[derive(Debug, Clone)]
pub struct OrderIntake {
    config: PortalConfig,
    availability: AvailabilityEngine,
}

impl OrderIntake {
    pub fn new(config: PortalConfig) -> Self {
        let availability = AvailabilityEngine::new(config.clone());
        Self {
            config,
            availability,
        }
    }

    /// Validate a draft.
    ///
    /// On success the returned order is ready for the persistence
    /// collaborator: status forced to reserved, shipping date resolved.
    pub fn validate(
        &self,
        stock: &[StockEntry],
        orders: &[Order],
        draft: &OrderDraft,
        today: NaiveDate,
    ) -> AppResult<NewOrder> {
        let customer_id = draft.customer_id.ok_or_else(|| {
            AppError::validation("customer_id", "Customer is required", "กรุณาระบุลูกค้า")
        })?;
        let ordered_by = required_text(
            draft.ordered_by.as_deref(),
            "ordered_by",
            "Orderer name is required",
            "กรุณาระบุชื่อผู้สั่งซื้อ",
        )?;
        let customer_name = required_text(
            draft.customer_name.as_deref(),
            "customer_name",
            "Customer name is required",
            "กรุณาระบุชื่อลูกค้า",
        )?;

        let quantity_kg = draft.quantity_kg.ok_or_else(|| {
            AppError::validation("quantity_kg", "Quantity is required", "กรุณาระบุปริมาณ")
        })?;
        let step_kg = self.config.quantity_step_kg;
        if validation::validate_order_quantity(quantity_kg, step_kg).is_err() {
            return Err(AppError::Validation {
                field: "quantity_kg".to_string(),
                message: format!("Quantity must be a positive multiple of {} kg", step_kg),
                message_th: format!(
                    "ปริมาณต้องมากกว่าศูนย์และเป็นจำนวนเท่าของ {} กิโลกรัม",
                    step_kg
                ),
            });
        }

        let supplied_date = draft
            .shipping_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let shipping_date = match supplied_date {
            None => {
                let result =
                    self.availability
                        .first_available_date(stock, orders, quantity_kg, today)?;
                match result.shipping_date {
                    Some(date) => date,
                    None => {
                        return Err(AppError::InsufficientStock {
                            requested_kg: quantity_kg,
                            available_kg: result.available_kg,
                        })
                    }
                }
            }
            Some(raw) => {
                let date = calendar::parse_flexible_date(raw).ok_or_else(|| {
                    AppError::validation(
                        "shipping_date",
                        "Unrecognized date format",
                        "รูปแบบวันที่ไม่ถูกต้อง",
                    )
                })?;
                if !calendar::is_weekday(date) {
                    return Err(AppError::validation(
                        "shipping_date",
                        "Shipping date cannot fall on a weekend",
                        "วันที่จัดส่งต้องไม่ตรงกับวันหยุดสุดสัปดาห์",
                    ));
                }
                let min_date =
                    calendar::minimum_order_date(today, self.config.lead_time_business_days);
                if date < min_date {
                    return Err(AppError::Validation {
                        field: "shipping_date".to_string(),
                        message: format!("Shipping date must be on or after {}", min_date),
                        message_th: format!("วันที่จัดส่งต้องไม่เร็วกว่า {}", min_date),
                    });
                }
                // Direct accumulation on the exact requested date,
                // independent of period bucketing.
                let free = periods::free_stock_on(stock, orders, date);
                if quantity_kg > free {
                    return Err(AppError::InsufficientStock {
                        requested_kg: quantity_kg,
                        available_kg: free.max(0),
                    });
                }
                date
            }
        };

        Ok(NewOrder {
            customer_id,
            ordered_by,
            customer_name,
            quantity_kg,
            status: OrderStatus::Reserved,
            shipping_date: Some(shipping_date),
            notes: draft.notes.clone(),
        })
    }
}

fn required_text(
    value: Option<&str>,
    field: &str,
    message: &str,
    message_th: &str,
) -> AppResult<String> {
    match value {
        Some(text) if validation::validate_required_text(text).is_ok() => {
            Ok(text.trim().to_string())
        }
        _ => Err(AppError::validation(field, message, message_th)),
    }
}
