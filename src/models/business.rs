//! Business data models.
//!
//! This module defines:
//! - `Business`: database entity for a marketplace business
//! - `BusinessHours` / `DayHours`: the declared weekly pickup hours

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Represents a business record from the database.
///
/// # Database Table
///
/// Maps to the `businesses` table. Each business:
/// - Declares optional weekly pickup hours (stored as JSONB)
/// - Holds at most one Stripe Connect account
///
/// # Payment Account Fields
///
/// `stripe_account_id`, `stripe_account_status`, `payouts_enabled`,
/// `details_submitted` and `stripe_onboarding_completed_at` together form
/// the business's payment account record. They are only mutated by the
/// status-sync operation, in a single row update.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Business {
    /// Unique identifier for this business
    pub id: Uuid,

    /// Display name shown in the marketplace
    pub name: String,

    /// Owner contact email, also used when provisioning the payments account
    pub contact_email: String,

    /// Declared weekly pickup hours; `None` means no pickups offered
    pub business_hours: Option<Json<BusinessHours>>,

    /// Stripe connected account id, once onboarding has started
    pub stripe_account_id: Option<String>,

    /// Last derived account status ("pending", "verified" or "restricted")
    pub stripe_account_status: Option<String>,

    /// Whether the payments provider currently allows payouts
    pub payouts_enabled: bool,

    /// Whether the owner has submitted all requested onboarding details
    pub details_submitted: bool,

    /// Set once, the first time the account is derived as verified
    pub stripe_onboarding_completed_at: Option<DateTime<Utc>>,

    /// Timestamp when the business was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update to this row
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// The declared hours, or an all-closed week when none are declared.
    pub fn hours(&self) -> BusinessHours {
        self.business_hours
            .as_ref()
            .map(|json| json.0.clone())
            .unwrap_or_default()
    }
}

/// Weekly pickup hours declared by a business.
///
/// A missing day means the business is closed that day.
///
/// # JSON Example
///
/// ```json
/// {
///   "monday": { "open": "09:00:00", "close": "17:00:00" },
///   "saturday": { "open": "10:00:00", "close": "14:00:00" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

impl BusinessHours {
    /// Declared hours for the given weekday, if open that day.
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayHours> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }
}

/// Opening and closing time for a single day, in the business's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn for_weekday_maps_each_day() {
        let hours = BusinessHours {
            monday: Some(DayHours {
                open: t(9, 0),
                close: t(17, 0),
            }),
            ..Default::default()
        };

        assert!(hours.for_weekday(Weekday::Mon).is_some());
        assert!(hours.for_weekday(Weekday::Tue).is_none());
        assert!(hours.for_weekday(Weekday::Sun).is_none());
    }

    #[test]
    fn hours_deserialize_with_missing_days() {
        let hours: BusinessHours = serde_json::from_str(
            r#"{"monday": {"open": "09:00:00", "close": "17:00:00"}}"#,
        )
        .unwrap();

        assert_eq!(
            hours.monday,
            Some(DayHours {
                open: t(9, 0),
                close: t(17, 0),
            })
        );
        assert!(hours.tuesday.is_none());
    }
}
