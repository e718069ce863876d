//! Pickup slot models and generator configuration.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A discrete pickup time offered to a customer.
///
/// Value object with no identity; slots are regenerated on every query and
/// never persisted.
///
/// # JSON Example
///
/// ```json
/// {
///   "date": "2026-08-03",
///   "time": "12:30:00",
///   "label": "Mon, Aug 3 at 12:30 PM"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// Calendar date of the slot, business-local
    pub date: NaiveDate,

    /// Start time of the slot, business-local
    pub time: NaiveTime,

    /// Human-readable date/time label shown to customers
    pub label: String,
}

/// Configuration for the pickup slot generator.
#[derive(Debug, Clone, Copy)]
pub struct SlotConfig {
    /// Spacing between consecutive slot boundaries, in minutes
    pub granularity_minutes: i64,

    /// Minimum delay between "now" and the earliest offerable slot, in minutes
    pub lead_time_minutes: i64,

    /// Number of days to look ahead, starting today
    pub horizon_days: u64,

    /// Fixed offset of the businesses' local clock from UTC, in minutes.
    ///
    /// The marketplace serves a single metro area, so one deployment-wide
    /// offset is sufficient.
    pub local_utc_offset_minutes: i32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: 30,
            lead_time_minutes: 15,
            horizon_days: 7,
            local_utc_offset_minutes: 0,
        }
    }
}

/// Response body for the pickup slot listing endpoint.
#[derive(Debug, Serialize)]
pub struct PickupSlotsResponse {
    pub slots: Vec<TimeSlot>,
}
