//! Shared types and models for the green-bean ordering portal
//!
//! This crate contains types shared between the backend engines and any
//! front end consuming the portal's JSON results.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
