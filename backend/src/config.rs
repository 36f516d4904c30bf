//! Configuration management for the ordering portal
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BOP_ prefix

use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Allocation and ship-date engine configuration
    pub portal: PortalConfig,
}

/// Tunables for the allocation and ship-date engines.
///
/// Per-instance values rather than process-wide constants, so tests and
/// multi-tenant embeddings can override them.
#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    /// Minimum lead time between "today" and the earliest shipping date,
    /// counted in business days.
    pub lead_time_business_days: u32,

    /// Order granularity in kilograms; ordered quantities must be a
    /// positive multiple of this.
    pub quantity_step_kg: i64,

    /// How committed orders consume the stock timeline.
    pub consumption_policy: ConsumptionPolicy,
}

/// Stock consumption policy used by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPolicy {
    /// Each period is an independent bucket: orders consume only the stock
    /// pool of the period their planned date falls in.
    #[default]
    PeriodBucket,

    /// Commitments accumulate across periods: a period's free stock is its
    /// pool minus every commitment planned at or before its end.
    CumulativeScan,

    /// Strict first-come-first-served queue ordered by planned date, then
    /// creation time; a delayed order carries its claim forward with it.
    SequentialFcfs,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("BOP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("portal.lead_time_business_days", 5)?
            .set_default("portal.quantity_step_kg", 20)?
            .set_default("portal.consumption_policy", "period_bucket")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BOP_ prefix)
            .add_source(
                Environment::with_prefix("BOP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            lead_time_business_days: 5,
            quantity_step_kg: 20,
            consumption_policy: ConsumptionPolicy::default(),
        }
    }
}
