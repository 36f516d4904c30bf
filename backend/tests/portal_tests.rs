//! Portal facade tests
//!
//! Dashboard assembly, JSON shapes for the request layer, configuration
//! defaults, and storage error propagation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use bean_order_portal_backend::config::{Config, ConsumptionPolicy, PortalConfig};
use bean_order_portal_backend::error::{AppError, ErrorResponse};
use bean_order_portal_backend::services::intake::OrderDraft;
use bean_order_portal_backend::services::portal::PortalService;
use bean_order_portal_backend::store::{InMemoryStore, PortalStore, StoreError};
use shared::models::{NewOrder, Order, OrderStatus, StockEntry};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bean_order_portal_backend=debug")
        .try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pending_order(quantity_kg: i64, shipping_date: NaiveDate) -> Order {
    Order {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        customer_id: Uuid::new_v4(),
        ordered_by: "Fai".to_string(),
        customer_name: "Doi Chang Roastery".to_string(),
        quantity_kg,
        status: OrderStatus::Reserved,
        shipping_date: Some(shipping_date),
        notes: None,
    }
}

/// The 2026 season fixture used across the suite.
fn season_portal() -> PortalService<InMemoryStore> {
    let stock = vec![
        StockEntry::new(date(2026, 1, 1), 6000),
        StockEntry::new(date(2026, 3, 16), 2000),
        StockEntry::new(date(2026, 4, 16), 4800),
        StockEntry::new(date(2026, 6, 1), 960),
        StockEntry::new(date(2026, 9, 1), 4800),
    ];
    let orders = vec![
        pending_order(480, date(2026, 1, 28)),
        pending_order(900, date(2026, 2, 8)),
        pending_order(1440, date(2026, 2, 11)),
        pending_order(1920, date(2026, 2, 13)),
        pending_order(480, date(2026, 2, 25)),
        pending_order(4800, date(2026, 3, 16)),
        pending_order(6360, date(2026, 5, 16)),
    ];
    PortalService::new(
        InMemoryStore::with_data(stock, orders),
        PortalConfig::default(),
    )
}

fn today() -> NaiveDate {
    date(2026, 1, 27)
}

#[tokio::test]
async fn test_dashboard_assembles_timeline_and_verdicts() {
    init_tracing();
    let portal = season_portal();
    let dashboard = portal.dashboard(today()).await.unwrap();

    assert_eq!(dashboard.available_now_kg, 780);
    assert_eq!(dashboard.stock_timeline.len(), 5);
    assert_eq!(dashboard.orders.len(), 7);
    for row in &dashboard.orders {
        assert_eq!(row.order.id, row.fulfillment.order_id);
    }
    // Every period is fully covered this season, so nothing slips.
    assert!(dashboard.orders.iter().all(|row| row.fulfillment.on_schedule));
}

#[tokio::test]
async fn test_dashboard_serializes_to_clean_json() {
    let portal = season_portal();
    let dashboard = portal.dashboard(today()).await.unwrap();

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["available_now_kg"], 780);
    assert_eq!(json["stock_timeline"][0]["start_date"], "2026-01-01");
    assert_eq!(json["stock_timeline"][0]["end_date"], "2026-03-16");
    assert_eq!(json["stock_timeline"][0]["free_kg"], 780);
    assert_eq!(json["stock_timeline"][4]["end_date"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_availability_result_serialization() {
    let portal = season_portal();

    let available = portal.check_availability(500, today()).await.unwrap();
    let json = serde_json::to_value(&available).unwrap();
    assert_eq!(json["shipping_date"], "2026-02-03");
    assert_eq!(json["available_kg"], 780);
    // No diagnostic on success.
    assert!(json.get("message").is_none());

    let insufficient = portal.check_availability(19000, today()).await.unwrap();
    let json = serde_json::to_value(&insufficient).unwrap();
    assert_eq!(json["shipping_date"], serde_json::Value::Null);
    assert_eq!(json["available_kg"], 18560);
    assert!(json["message"].as_str().unwrap().contains("Insufficient"));
}

#[tokio::test]
async fn test_check_availability_is_idempotent() {
    let portal = season_portal();
    let first = portal.check_availability(800, today()).await.unwrap();
    let second = portal.check_availability(800, today()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_error_envelope_shape() {
    let portal = season_portal();
    let draft = OrderDraft {
        quantity_kg: Some(250),
        customer_id: Some(Uuid::new_v4()),
        ordered_by: Some("Fai".to_string()),
        customer_name: Some("Doi Chang Roastery".to_string()),
        ..OrderDraft::default()
    };
    let err = portal.create_order(&draft, today()).await.unwrap_err();

    let json = serde_json::to_value(ErrorResponse { error: err.detail() }).unwrap();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "quantity_kg");
    assert!(json["error"]["message_en"].as_str().unwrap().contains("20 kg"));
    assert!(json["error"]["message_th"].as_str().is_some());
}

// ============================================================================
// Storage failure propagation
// ============================================================================

struct BrokenStore;

#[async_trait]
impl PortalStore for BrokenStore {
    async fn list_stock_entries(&self) -> Result<Vec<StockEntry>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn append_order(&self, _order: NewOrder) -> Result<Order, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_errors_propagate_unchanged() {
    let portal = PortalService::new(BrokenStore, PortalConfig::default());
    let err = portal.dashboard(today()).await.unwrap_err();
    match err {
        AppError::Storage(StoreError::Unavailable(message)) => {
            assert!(message.contains("connection refused"));
        }
        other => panic!("expected Storage error, got {}", other.detail().code),
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::load().unwrap();
    assert_eq!(config.environment, "development");
    assert_eq!(config.portal.lead_time_business_days, 5);
    assert_eq!(config.portal.quantity_step_kg, 20);
    assert_eq!(config.portal.consumption_policy, ConsumptionPolicy::PeriodBucket);
}

#[test]
fn test_consumption_policy_serde_names() {
    let json = serde_json::to_string(&ConsumptionPolicy::SequentialFcfs).unwrap();
    assert_eq!(json, "\"sequential_fcfs\"");
    let policy: ConsumptionPolicy = serde_json::from_str("\"cumulative_scan\"").unwrap();
    assert_eq!(policy, ConsumptionPolicy::CumulativeScan);
}
