//! Validation utilities for the ordering portal
//!
//! Pure checks shared by the intake validator and any front end that wants
//! to pre-validate before submitting.

/// Validate an ordered quantity against the sack granularity.
///
/// Quantities are whole kilograms and must be a positive multiple of
/// `step_kg` (the portal sells by the sack).
pub fn validate_order_quantity(quantity_kg: i64, step_kg: i64) -> Result<(), &'static str> {
    if quantity_kg <= 0 {
        return Err("Quantity must be positive");
    }
    if step_kg > 0 && quantity_kg % step_kg != 0 {
        return Err("Quantity must be a whole number of sacks");
    }
    Ok(())
}

/// Validate that a required text field carries something besides whitespace.
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Field cannot be empty")
    } else {
        Ok(())
    }
}
