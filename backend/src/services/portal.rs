//! Portal facade: the three operations exposed to the request layer
//!
//! Each operation independently re-reads both collections through the store
//! collaborator and recomputes its result from scratch; no derived state
//! survives a call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::models::Order;

use crate::config::PortalConfig;
use crate::error::AppResult;
use crate::services::availability::{AvailabilityEngine, AvailabilityResult};
use crate::services::fulfillment::{FulfillmentEngine, OrderFulfillment};
use crate::services::intake::{OrderDraft, OrderIntake};
use crate::services::periods::{self, StockPeriod};
use crate::store::PortalStore;

/// One order joined with its fulfillment verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithFulfillment {
    pub order: Order,
    pub fulfillment: OrderFulfillment,
}

/// Everything the portal landing page needs in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Free stock in the period covering today; shown next to the order
    /// form.
    pub available_now_kg: i64,
    pub stock_timeline: Vec<StockPeriod>,
    pub orders: Vec<OrderWithFulfillment>,
}

/// The portal core, generic over the data-access collaborator.
pub struct PortalService<S> {
    store: S,
    config: PortalConfig,
    availability: AvailabilityEngine,
    fulfillment: FulfillmentEngine,
    intake: OrderIntake,
}

impl<S: PortalStore> PortalService<S> {
    pub fn new(store: S, config: PortalConfig) -> Self {
        Self {
            availability: AvailabilityEngine::new(config.clone()),
            fulfillment: FulfillmentEngine::new(config.clone()),
            intake: OrderIntake::new(config.clone()),
            store,
            config,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Stock timeline plus per-order fulfillment for the dashboard page.
    pub async fn dashboard(&self, today: NaiveDate) -> AppResult<Dashboard> {
        let stock = self.store.list_stock_entries().await?;
        let orders = self.store.list_orders().await?;

        let timeline = periods::build_periods(&stock, &orders);
        let available_now_kg = timeline
            .iter()
            .find(|period| period.contains(today))
            .map_or(0, |period| period.free_kg);
        let verdicts = self.fulfillment.assess_orders(&stock, &orders, today);
        let orders = orders
            .into_iter()
            .zip(verdicts)
            .map(|(order, fulfillment)| OrderWithFulfillment { order, fulfillment })
            .collect();

        tracing::debug!(periods = timeline.len(), "dashboard computed");
        Ok(Dashboard {
            available_now_kg,
            stock_timeline: timeline,
            orders,
        })
    }

    /// Earliest shipping date for a prospective quantity.
    pub async fn check_availability(
        &self,
        requested_kg: i64,
        today: NaiveDate,
    ) -> AppResult<AvailabilityResult> {
        let stock = self.store.list_stock_entries().await?;
        let orders = self.store.list_orders().await?;
        let result = self
            .availability
            .first_available_date(&stock, &orders, requested_kg, today)?;
        tracing::info!(
            requested_kg,
            shipping_date = ?result.shipping_date,
            available_kg = result.available_kg,
            "availability checked"
        );
        Ok(result)
    }

    /// Validate and persist a new order.
    pub async fn create_order(&self, draft: &OrderDraft, today: NaiveDate) -> AppResult<Order> {
        let stock = self.store.list_stock_entries().await?;
        let orders = self.store.list_orders().await?;
        let validated = self.intake.validate(&stock, &orders, draft, today)?;
        let order = self.store.append_order(validated).await?;
        tracing::info!(
            order_id = %order.id,
            status = order.status.as_str(),
            quantity_kg = order.quantity_kg,
            shipping_date = ?order.shipping_date,
            "order created"
        );
        Ok(order)
    }
}
