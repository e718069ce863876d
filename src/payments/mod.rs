//! Payments provider client abstraction.
//!
//! The rest of the application talks to the payments platform through the
//! `PaymentsClient` trait, so handlers and services never touch a global
//! SDK client. The production implementation (`StripeClient`) lives in
//! `stripe`; tests substitute their own doubles.

pub mod stripe;

use async_trait::async_trait;

pub use stripe::StripeClient;

/// Errors surfaced by the payments provider, classified by category.
///
/// Nothing in this crate retries automatically; callers decide whether a
/// `transient` failure is worth retrying and whether a validation failure
/// should be surfaced to the user.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentsError {
    /// The provider rejected the request as malformed or inconsistent.
    #[error("payments provider rejected the request: {0}")]
    InvalidRequest(String),

    /// The referenced account is unknown to the provider.
    #[error("payments account not found: {0}")]
    AccountNotFound(String),

    /// Our API credentials were rejected.
    #[error("payments provider authentication failed: {0}")]
    Authentication(String),

    /// Network failure, rate limit, or a provider-side error. Safe to retry.
    #[error("payments provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something we could not interpret.
    #[error("unexpected payments provider response: {0}")]
    Protocol(String),
}

impl PaymentsError {
    /// Whether the caller may reasonably retry the operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, PaymentsError::Unavailable(_))
    }
}

/// Details for provisioning a new connected account.
#[derive(Debug, Clone)]
pub struct NewConnectedAccount {
    pub email: String,
    pub business_name: String,
}

/// Point-in-time capability flags for a connected account, as reported by
/// the payments provider.
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub id: String,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub details_submitted: bool,

    /// Reason the provider has disabled the account, if any
    pub disabled_reason: Option<String>,

    /// Onboarding requirements currently due from the owner
    pub currently_due: Vec<String>,
}

/// Client for the external payments platform.
#[async_trait]
pub trait PaymentsClient: Send + Sync {
    /// Provision a new connected account and return its id.
    async fn create_account(
        &self,
        account: &NewConnectedAccount,
    ) -> Result<String, PaymentsError>;

    /// Fetch the current capability flags for an account.
    async fn retrieve_account(&self, account_id: &str) -> Result<AccountSnapshot, PaymentsError>;

    /// Request a short-lived onboarding/continuation URL for an account.
    async fn create_onboarding_link(
        &self,
        account_id: &str,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<String, PaymentsError>;
}
