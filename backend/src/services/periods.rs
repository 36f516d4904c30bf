//! Stock timeline partitioning
//!
//! Converts the unordered delivery listing into contiguous periods, each
//! with a cumulative stock pool and the pending orders committed inside it.
//! The table is recomputed on every query; nothing here is cached.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::models::{Order, StockEntry};

use crate::config::ConsumptionPolicy;
use crate::services::calendar;

/// A contiguous window between two consecutive delivery dates.
///
/// `end_date` is exclusive; the last period is open-ended. `free_kg` may be
/// negative when the period is over-committed; that is a meaningful state,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPeriod {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    /// Cumulative incoming kg from every delivery at or before `start_date`.
    pub stock_pool_kg: i64,

    /// Pending order kg planned inside `[start_date, end_date)`.
    pub committed_kg: i64,

    /// `stock_pool_kg - committed_kg`.
    pub free_kg: i64,
}

impl StockPeriod {
    /// Whether `date` falls inside this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date < end)
    }
}

/// Partition the timeline into stock periods.
///
/// Deliveries sharing a date are merged into one delivery point. Zero stock
/// entries yield an empty table. Orders without a planned date are not
/// committed to any period; the fulfillment engine reports them separately.
pub fn build_periods(stock: &[StockEntry], orders: &[Order]) -> Vec<StockPeriod> {
    let mut deliveries: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for entry in stock {
        *deliveries.entry(entry.delivery_date).or_insert(0) += entry.incoming_kg;
    }

    let dates: Vec<NaiveDate> = deliveries.keys().copied().collect();
    let mut periods = Vec::with_capacity(dates.len());
    let mut pool = 0i64;
    for (i, start) in dates.iter().copied().enumerate() {
        pool += deliveries[&start];
        let end = dates.get(i + 1).copied();
        let committed: i64 = orders
            .iter()
            .filter(|order| order.status.is_pending())
            .filter_map(|order| order.shipping_date.map(|date| (date, order.quantity_kg)))
            .filter(|(date, _)| *date >= start && end.map_or(true, |e| *date < e))
            .map(|(_, kg)| kg)
            .sum();
        periods.push(StockPeriod {
            start_date: start,
            end_date: end,
            stock_pool_kg: pool,
            committed_kg: committed,
            free_kg: pool - committed,
        });
    }
    periods
}

/// Free stock on a given date, by direct accumulation: every delivery at or
/// before `as_of` minus every pending order planned at or before `as_of`.
/// Independent of period bucketing.
pub fn free_stock_on(stock: &[StockEntry], orders: &[Order], as_of: NaiveDate) -> i64 {
    let delivered: i64 = stock
        .iter()
        .filter(|entry| entry.delivery_date <= as_of)
        .map(|entry| entry.incoming_kg)
        .sum();
    let committed: i64 = orders
        .iter()
        .filter(|order| order.status.is_pending())
        .filter(|order| order.shipping_date.map_or(false, |date| date <= as_of))
        .map(|order| order.quantity_kg)
        .sum();
    delivered - committed
}

/// Index of the period containing `date`, if any.
pub fn period_containing(periods: &[StockPeriod], date: NaiveDate) -> Option<usize> {
    periods.iter().position(|period| period.contains(date))
}

/// Cumulative stock pool on `date`; zero before the first delivery.
pub fn stock_pool_on(periods: &[StockPeriod], date: NaiveDate) -> i64 {
    period_containing(periods, date).map_or(0, |i| periods[i].stock_pool_kg)
}

/// Per-period free stock as offered to a new order, under the given policy.
pub fn effective_free(
    periods: &[StockPeriod],
    policy: ConsumptionPolicy,
    orders: &[Order],
) -> Vec<i64> {
    match policy {
        ConsumptionPolicy::PeriodBucket => periods.iter().map(|p| p.free_kg).collect(),
        ConsumptionPolicy::CumulativeScan => {
            let mut committed = 0i64;
            periods
                .iter()
                .map(|p| {
                    committed += p.committed_kg;
                    p.stock_pool_kg - committed
                })
                .collect()
        }
        ConsumptionPolicy::SequentialFcfs => {
            // A new request joins the back of the queue: every pending,
            // scheduled order keeps its claim ahead of it.
            let claimed: i64 = orders
                .iter()
                .filter(|o| o.status.is_pending() && o.shipping_date.is_some())
                .map(|o| o.quantity_kg)
                .sum();
            periods.iter().map(|p| p.stock_pool_kg - claimed).collect()
        }
    }
}

/// First weekday inside the period at or after `not_before`.
pub fn first_weekday_within(period: &StockPeriod, not_before: NaiveDate) -> Option<NaiveDate> {
    let mut day = period.start_date.max(not_before);
    loop {
        if let Some(end) = period.end_date {
            if day >= end {
                return None;
            }
        }
        if calendar::is_weekday(day) {
            return Some(day);
        }
        day = day.succ_opt()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::OrderStatus;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(quantity_kg: i64, shipping_date: Option<NaiveDate>, status: OrderStatus) -> Order {
        Order {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            customer_id: Uuid::new_v4(),
            ordered_by: "Fai".to_string(),
            customer_name: "Doi Chang Roastery".to_string(),
            quantity_kg,
            status,
            shipping_date,
            notes: None,
        }
    }

    #[test]
    fn test_empty_stock_yields_no_periods() {
        assert!(build_periods(&[], &[]).is_empty());
    }

    #[test]
    fn test_same_day_deliveries_merge() {
        let stock = vec![
            StockEntry::new(date(2026, 1, 5), 300),
            StockEntry::new(date(2026, 1, 5), 200),
        ];
        let periods = build_periods(&stock, &[]);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].stock_pool_kg, 500);
        assert_eq!(periods[0].end_date, None);
    }

    #[test]
    fn test_committed_partition() {
        let stock = vec![
            StockEntry::new(date(2026, 1, 5), 1000),
            StockEntry::new(date(2026, 2, 2), 1000),
        ];
        let orders = vec![
            order(400, Some(date(2026, 1, 7)), OrderStatus::Reserved),
            order(200, Some(date(2026, 2, 2)), OrderStatus::Reserved),
            // Settled and dateless orders never commit stock.
            order(600, Some(date(2026, 1, 9)), OrderStatus::Shipped),
            order(600, None, OrderStatus::Reserved),
        ];
        let periods = build_periods(&stock, &orders);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].committed_kg, 400);
        assert_eq!(periods[0].free_kg, 600);
        assert_eq!(periods[1].committed_kg, 200);
        assert_eq!(periods[1].stock_pool_kg, 2000);
        assert_eq!(periods[1].free_kg, 1800);
    }

    #[test]
    fn test_free_stock_on_is_cumulative() {
        let stock = vec![
            StockEntry::new(date(2026, 1, 5), 1000),
            StockEntry::new(date(2026, 2, 2), 1000),
        ];
        let orders = vec![order(600, Some(date(2026, 1, 7)), OrderStatus::Reserved)];
        assert_eq!(free_stock_on(&stock, &orders, date(2026, 1, 4)), 0);
        assert_eq!(free_stock_on(&stock, &orders, date(2026, 1, 6)), 1000);
        assert_eq!(free_stock_on(&stock, &orders, date(2026, 1, 14)), 400);
        assert_eq!(free_stock_on(&stock, &orders, date(2026, 2, 2)), 1400);
    }
}
