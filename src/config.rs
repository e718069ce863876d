//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

use crate::models::slots::SlotConfig;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `STRIPE_SECRET_KEY` (required): secret API key for the Stripe account
/// - `STRIPE_WEBHOOK_SECRET` (optional): signing secret for inbound
///   `account.updated` events; the webhook route rejects events when unset
/// - `STRIPE_API_BASE` (optional): Stripe API base URL, overridden in tests
/// - `PUBLIC_BASE_URL` (optional): public URL of the marketplace frontend,
///   used to build onboarding return/refresh links
/// - `SLOT_GRANULARITY_MINUTES` (optional): spacing between pickup slots,
///   defaults to 30
/// - `SLOT_LEAD_TIME_MINUTES` (optional): minimum delay before the first
///   offerable slot, defaults to 15
/// - `SLOT_HORIZON_DAYS` (optional): how many days ahead to offer slots,
///   defaults to 7
/// - `LOCAL_UTC_OFFSET_MINUTES` (optional): offset of the businesses'
///   local clock from UTC, defaults to 0
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub stripe_secret_key: String,

    #[serde(default)]
    pub stripe_webhook_secret: Option<String>,

    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,

    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_granularity_minutes")]
    pub slot_granularity_minutes: i64,

    #[serde(default = "default_lead_time_minutes")]
    pub slot_lead_time_minutes: i64,

    #[serde(default = "default_horizon_days")]
    pub slot_horizon_days: u64,

    #[serde(default)]
    pub local_utc_offset_minutes: i32,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_granularity_minutes() -> i64 {
    30
}

fn default_lead_time_minutes() -> i64 {
    15
}

fn default_horizon_days() -> u64 {
    7
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Slot generator configuration derived from the environment.
    pub fn slot_config(&self) -> SlotConfig {
        SlotConfig {
            granularity_minutes: self.slot_granularity_minutes,
            lead_time_minutes: self.slot_lead_time_minutes,
            horizon_days: self.slot_horizon_days,
            local_utc_offset_minutes: self.local_utc_offset_minutes,
        }
    }
}
