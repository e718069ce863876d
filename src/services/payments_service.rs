//! Payment account lifecycle - core business logic.
//!
//! Tracks a business's connected account from none → pending →
//! verified | restricted. Status is always derived fresh from the
//! payments provider and persisted in a single atomic row update, so
//! readers never observe a half-updated status/payouts pair.
//!
//! Nothing here retries automatically; provider errors are surfaced by
//! category and the caller decides what to do with transient failures.

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::business::Business;
use crate::models::payment_account::{AccountStatus, PaymentAccount, PaymentAccountUpdate};
use crate::payments::{AccountSnapshot, NewConnectedAccount, PaymentsClient};
use crate::repository::BusinessRepository;

/// Result of starting payment onboarding for a business.
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub account_id: String,

    /// False when the business already held an account and the existing
    /// id was returned instead.
    pub created: bool,
}

/// Result of a status sync, including the provider's outstanding
/// onboarding requirements.
#[derive(Debug, Clone)]
pub struct SyncedAccount {
    pub account: PaymentAccount,
    pub requirements: Vec<String>,
}

/// Derive the lifecycle status from a provider snapshot.
///
/// # Derivation
///
/// - `Verified` iff charges, payouts and details are all enabled
/// - else `Restricted` iff the provider reports a disable reason
/// - else `Pending`
///
/// Full enablement wins over a stale disable reason, so a verified
/// account never carries `payouts_enabled == false`.
pub fn derive_status(snapshot: &AccountSnapshot) -> AccountStatus {
    if snapshot.charges_enabled && snapshot.payouts_enabled && snapshot.details_submitted {
        AccountStatus::Verified
    } else if snapshot.disabled_reason.is_some() {
        AccountStatus::Restricted
    } else {
        AccountStatus::Pending
    }
}

/// Start payment onboarding for a business.
///
/// Idempotent: if the business already holds an account id, it is
/// returned as-is and no second external account is provisioned.
/// Otherwise a new account is created with the payments provider and the
/// business row is initialized to `pending`.
///
/// # Errors
///
/// - `InvalidRequest`: blank email or business name
/// - `BusinessNotFound`: unknown business id
/// - `Payments`: provider rejected or failed the account creation
pub async fn create_account(
    repo: &dyn BusinessRepository,
    payments: &dyn PaymentsClient,
    business_id: Uuid,
    email: &str,
    business_name: &str,
) -> Result<CreatedAccount, AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::InvalidRequest(
            "A valid contact email is required".to_string(),
        ));
    }
    if business_name.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Business name is required".to_string(),
        ));
    }

    let business = repo
        .get(business_id)
        .await?
        .ok_or(AppError::BusinessNotFound)?;

    if let Some(existing) = business.stripe_account_id {
        return Ok(CreatedAccount {
            account_id: existing,
            created: false,
        });
    }

    let account_id = payments
        .create_account(&NewConnectedAccount {
            email: email.to_string(),
            business_name: business_name.to_string(),
        })
        .await?;

    repo.update_payment_fields(
        business_id,
        PaymentAccountUpdate {
            stripe_account_id: Some(account_id.clone()),
            stripe_account_status: Some(AccountStatus::Pending),
            payouts_enabled: Some(false),
            details_submitted: Some(false),
            ..Default::default()
        },
    )
    .await?;

    Ok(CreatedAccount {
        account_id,
        created: true,
    })
}

/// Re-derive an account's status from the payments provider.
///
/// Reads fresh capability flags, derives the status, and - when
/// `business_id` is supplied - persists the result on the business row.
/// Idempotent: unchanged provider flags yield the same `PaymentAccount`
/// on every call.
///
/// # Errors
///
/// - `BusinessNotFound`: `business_id` supplied but unknown
/// - `InvalidRequest`: the business holds a different account id
/// - `Payments(AccountNotFound)`: the provider does not know the account
pub async fn sync_account_status(
    repo: &dyn BusinessRepository,
    payments: &dyn PaymentsClient,
    account_id: &str,
    business_id: Option<Uuid>,
) -> Result<SyncedAccount, AppError> {
    let business = match business_id {
        Some(id) => {
            let business = repo.get(id).await?.ok_or(AppError::BusinessNotFound)?;
            if business.stripe_account_id.as_deref() != Some(account_id) {
                return Err(AppError::InvalidRequest(
                    "Account does not belong to this business".to_string(),
                ));
            }
            Some(business)
        }
        None => None,
    };

    let snapshot = payments.retrieve_account(account_id).await?;
    let status = derive_status(&snapshot);

    let onboarding_completed_at = match &business {
        Some(business) => persist_snapshot(repo, business, &snapshot, status).await?,
        None => None,
    };

    Ok(SyncedAccount {
        account: PaymentAccount {
            account_id: snapshot.id.clone(),
            status,
            payouts_enabled: snapshot.payouts_enabled,
            details_submitted: snapshot.details_submitted,
            onboarding_completed_at,
        },
        requirements: snapshot.currently_due,
    })
}

/// Persist a derived snapshot on the business row.
///
/// Stamps `stripe_onboarding_completed_at` the first time the account is
/// derived as verified; later syncs keep the original timestamp. Returns
/// the effective completion timestamp.
pub async fn persist_snapshot(
    repo: &dyn BusinessRepository,
    business: &Business,
    snapshot: &AccountSnapshot,
    status: AccountStatus,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let newly_completed = (status == AccountStatus::Verified
        && business.stripe_onboarding_completed_at.is_none())
    .then(Utc::now);

    repo.update_payment_fields(
        business.id,
        PaymentAccountUpdate {
            stripe_account_status: Some(status),
            payouts_enabled: Some(snapshot.payouts_enabled),
            details_submitted: Some(snapshot.details_submitted),
            stripe_onboarding_completed_at: newly_completed,
            ..Default::default()
        },
    )
    .await?;

    Ok(business.stripe_onboarding_completed_at.or(newly_completed))
}

/// Request a fresh onboarding link for a business's account.
///
/// Refresh and return URLs point back at the business dashboard under the
/// configured public base URL.
///
/// # Errors
///
/// - `BusinessNotFound`: unknown business id
/// - `InvalidRequest`: the business holds a different account id, or the
///   provider does not recognize the account
pub async fn create_onboarding_link(
    repo: &dyn BusinessRepository,
    payments: &dyn PaymentsClient,
    public_base: &Url,
    account_id: &str,
    business_id: Uuid,
) -> Result<String, AppError> {
    let business = repo
        .get(business_id)
        .await?
        .ok_or(AppError::BusinessNotFound)?;

    if business.stripe_account_id.as_deref() != Some(account_id) {
        return Err(AppError::InvalidRequest(
            "Account does not belong to this business".to_string(),
        ));
    }

    let refresh_url = dashboard_url(public_base, business_id, "refresh");
    let return_url = dashboard_url(public_base, business_id, "complete");

    let url = payments
        .create_onboarding_link(account_id, &refresh_url, &return_url)
        .await?;

    Ok(url)
}

/// Dashboard URL the owner lands on when leaving the provider's
/// onboarding flow.
fn dashboard_url(public_base: &Url, business_id: Uuid, onboarding_state: &str) -> String {
    // Url's Display always ends the authority with a slash.
    format!("{public_base}dashboard/business/{business_id}?onboarding={onboarding_state}")
}
