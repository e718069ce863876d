//! Payment account models and API request/response types.
//!
//! This module defines:
//! - `AccountStatus`: the derived lifecycle status of a connected account
//! - `PaymentAccount`: the account record owned by a business
//! - `PaymentAccountUpdate`: partial update applied to the business row
//! - Request/response types for the payment endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived status of a business's payments account.
///
/// # Lifecycle
///
/// `pending` → `verified`, `pending` → `restricted`, and
/// `restricted` → `pending` (after the owner resolves the disable reason)
/// are the only reachable transitions. Neither `verified` nor
/// `restricted` is terminal; status only changes on the next sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Verified,
    Restricted,
}

impl AccountStatus {
    /// Status as stored in the `stripe_account_status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Verified => "verified",
            AccountStatus::Restricted => "restricted",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business's payment account record.
///
/// Invariant: `status == Verified` implies `payouts_enabled` and
/// `details_submitted`; `status == Restricted` implies the provider
/// reported a disable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccount {
    /// Opaque identifier assigned by the payments provider
    pub account_id: String,

    /// Derived lifecycle status
    pub status: AccountStatus,

    /// Whether the provider currently allows payouts
    pub payouts_enabled: bool,

    /// Whether the owner has submitted all requested details
    pub details_submitted: bool,

    /// First time the account was derived as verified, if ever
    pub onboarding_completed_at: Option<DateTime<Utc>>,
}

/// Partial update applied to the payment account fields of a business row.
///
/// `None` fields keep their stored value. The repository applies all set
/// fields in a single row update so readers never observe a half-updated
/// status/payouts pair.
#[derive(Debug, Clone, Default)]
pub struct PaymentAccountUpdate {
    pub stripe_account_id: Option<String>,
    pub stripe_account_status: Option<AccountStatus>,
    pub payouts_enabled: Option<bool>,
    pub details_submitted: Option<bool>,
    pub stripe_onboarding_completed_at: Option<DateTime<Utc>>,
}

/// Request to start payment onboarding for a business.
///
/// # JSON Example
///
/// ```json
/// {
///   "businessId": "550e8400-e29b-41d4-a716-446655440000",
///   "email": "owner@example.com",
///   "businessName": "Gresham Coffee Roasters"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Business requesting a payments account
    pub business_id: Uuid,

    /// Contact email registered with the payments provider
    pub email: String,

    /// Display name registered with the payments provider
    pub business_name: String,
}

/// Response for account creation.
///
/// Returned with 201 when a new account was provisioned, or 200 with the
/// existing id when the business already holds one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub account_id: String,
}

/// Request to re-derive the account status from the payments provider.
///
/// `businessId` is optional; when present the derived status is also
/// persisted to the business record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAccountRequest {
    pub account_id: String,
    pub business_id: Option<Uuid>,
}

/// Response for the status-sync endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "accountStatus": "pending",
///   "payoutsEnabled": false,
///   "detailsSubmitted": false,
///   "requirements": ["external_account", "tos_acceptance.date"]
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusResponse {
    pub account_status: AccountStatus,
    pub payouts_enabled: bool,
    pub details_submitted: bool,

    /// Outstanding onboarding requirements reported by the provider
    pub requirements: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed_at: Option<DateTime<Utc>>,
}

/// Request for a fresh onboarding/continuation link.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingLinkRequest {
    pub account_id: String,
    pub business_id: Uuid,
}

/// Response carrying the short-lived onboarding URL.
#[derive(Debug, Serialize)]
pub struct OnboardingLinkResponse {
    pub url: String,
}
