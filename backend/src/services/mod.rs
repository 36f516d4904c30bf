//! Business logic services for the ordering portal

pub mod availability;
pub mod calendar;
pub mod fulfillment;
pub mod intake;
pub mod periods;
pub mod portal;

pub use availability::{AvailabilityEngine, AvailabilityResult};
pub use fulfillment::{FulfillmentEngine, OrderFulfillment};
pub use intake::{OrderDraft, OrderIntake};
pub use periods::StockPeriod;
pub use portal::{Dashboard, OrderWithFulfillment, PortalService};
