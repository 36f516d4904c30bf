//! Per-order fulfillment assessment
//!
//! Answers, for every order on the books, whether it can ship on its
//! planned date under the configured consumption policy, and when it could
//! ship otherwise.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{Order, StockEntry};

use crate::config::{ConsumptionPolicy, PortalConfig};
use crate::services::calendar;
use crate::services::periods;

/// Fulfillment verdict for a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFulfillment {
    pub order_id: Uuid,

    /// True when the order ships on its planned date.
    pub on_schedule: bool,

    /// Planned date when on schedule, else the earliest alternative;
    /// absent when the order cannot be scheduled at all.
    pub earliest_date: Option<NaiveDate>,

    /// Calendar days between planned and earliest dates; absent when
    /// unschedulable.
    pub delay_days: Option<i64>,
}

impl OrderFulfillment {
    fn on_time(order: &Order) -> Self {
        Self {
            order_id: order.id,
            on_schedule: true,
            earliest_date: order.shipping_date,
            delay_days: Some(0),
        }
    }

    fn unschedulable(order: &Order) -> Self {
        Self {
            order_id: order.id,
            on_schedule: false,
            earliest_date: None,
            delay_days: None,
        }
    }

    fn delayed(order: &Order, earliest: NaiveDate) -> Self {
        let delay = order
            .shipping_date
            .map_or(0, |planned| (earliest - planned).num_days().max(0));
        Self {
            order_id: order.id,
            on_schedule: false,
            earliest_date: Some(earliest),
            delay_days: Some(delay),
        }
    }
}

/// Assesses the whole order book against the stock timeline.
#[derive(Debug, Clone)]
pub struct FulfillmentEngine {
    config: PortalConfig,
}

impl FulfillmentEngine {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    /// Assess every order, one verdict per order, in input order.
    ///
    /// Settled orders are on time by definition; orders without a planned
    /// date are always unschedulable.
    pub fn assess_orders(
        &self,
        stock: &[StockEntry],
        orders: &[Order],
        today: NaiveDate,
    ) -> Vec<OrderFulfillment> {
        let min_date = calendar::minimum_order_date(today, self.config.lead_time_business_days);
        match self.config.consumption_policy {
            ConsumptionPolicy::SequentialFcfs => self.assess_sequential(stock, orders, min_date),
            policy => self.assess_by_periods(stock, orders, min_date, policy),
        }
    }

    fn assess_by_periods(
        &self,
        stock: &[StockEntry],
        orders: &[Order],
        min_date: NaiveDate,
        policy: ConsumptionPolicy,
    ) -> Vec<OrderFulfillment> {
        let periods = periods::build_periods(stock, orders);
        let frees = periods::effective_free(&periods, policy, orders);

        orders
            .iter()
            .map(|order| {
                if order.status.is_settled() {
                    return OrderFulfillment::on_time(order);
                }
                let Some(planned) = order.shipping_date else {
                    return OrderFulfillment::unschedulable(order);
                };

                let containing = periods::period_containing(&periods, planned);
                if let Some(idx) = containing {
                    // committed_kg already nets this order's own quantity.
                    if frees[idx] >= 0 {
                        return OrderFulfillment::on_time(order);
                    }
                }

                // Reschedule: first later window able to absorb the full
                // quantity on top of its own commitments.
                let scan_from = containing.map_or(0, |idx| idx + 1);
                for (period, free) in periods.iter().zip(frees.iter().copied()).skip(scan_from) {
                    if free < order.quantity_kg {
                        continue;
                    }
                    let floor = planned.max(min_date);
                    if let Some(date) = periods::first_weekday_within(period, floor) {
                        return OrderFulfillment::delayed(order, date);
                    }
                }
                OrderFulfillment::unschedulable(order)
            })
            .collect()
    }

    /// Strict queue: pending orders consume the cumulative pool in
    /// (planned date, creation time) order, carrying their claim forward
    /// when delayed.
    fn assess_sequential(
        &self,
        stock: &[StockEntry],
        orders: &[Order],
        min_date: NaiveDate,
    ) -> Vec<OrderFulfillment> {
        let periods = periods::build_periods(stock, orders);
        let total_stock = periods.last().map_or(0, |p| p.stock_pool_kg);

        let mut queue: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status.is_pending() && o.shipping_date.is_some())
            .collect();
        queue.sort_by_key(|o| (o.shipping_date, o.created_at));

        let mut consumed = 0i64;
        let mut verdicts: HashMap<Uuid, OrderFulfillment> = HashMap::new();

        for order in queue {
            let Some(planned) = order.shipping_date else {
                continue;
            };
            if total_stock - consumed < order.quantity_kg {
                // Can never be covered; it releases its claim so later
                // orders are not blocked by a lost cause.
                verdicts.insert(order.id, OrderFulfillment::unschedulable(order));
                continue;
            }

            let available_on_planned = periods::stock_pool_on(&periods, planned) - consumed;
            if available_on_planned >= order.quantity_kg {
                consumed += order.quantity_kg;
                verdicts.insert(order.id, OrderFulfillment::on_time(order));
                continue;
            }

            let mut ship_day = None;
            for period in &periods {
                if period.stock_pool_kg - consumed < order.quantity_kg {
                    continue;
                }
                let floor = planned.max(min_date);
                if let Some(day) = periods::first_weekday_within(period, floor) {
                    ship_day = Some(day);
                    break;
                }
            }
            match ship_day {
                Some(day) => {
                    consumed += order.quantity_kg;
                    verdicts.insert(order.id, OrderFulfillment::delayed(order, day));
                }
                None => {
                    verdicts.insert(order.id, OrderFulfillment::unschedulable(order));
                }
            }
        }

        orders
            .iter()
            .map(|order| {
                if order.status.is_settled() {
                    OrderFulfillment::on_time(order)
                } else if let Some(verdict) = verdicts.remove(&order.id) {
                    verdict
                } else {
                    OrderFulfillment::unschedulable(order)
                }
            })
            .collect()
    }
}
