//! Green-bean ordering portal: stock allocation and ship-date core
//!
//! The engines here answer two questions for a small ordering portal: how
//! much stock is free for a new order and when it can ship, and which
//! outstanding orders will slip and to when. HTTP dispatch, persistence and
//! notification delivery live with external collaborators; this crate
//! exposes the three portal operations as plain async methods returning
//! JSON-ready values.

pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use config::{Config, ConsumptionPolicy, PortalConfig};
pub use error::{AppError, AppResult, ErrorDetail, ErrorResponse};
pub use services::portal::PortalService;
