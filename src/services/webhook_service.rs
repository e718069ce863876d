//! Inbound payments webhook verification and handling.
//!
//! Stripe pushes `account.updated` events whenever a connected account's
//! capabilities change, so status flips are reflected without waiting for
//! an explicit sync. Every event is verified against the endpoint's
//! signing secret before it is trusted.
//!
//! # Signature Scheme
//!
//! The `Stripe-Signature` header has the form `t=<unix>,v1=<hex>`, where
//! `v1` is HMAC-SHA256 over `"<t>.<raw body>"`. Events older than the
//! tolerance window are rejected to limit replay.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::AppError;
use crate::payments::AccountSnapshot;
use crate::payments::stripe::StripeAccount;
use crate::repository::BusinessRepository;
use crate::services::payments_service;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of a signed event.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// What handling an event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// An `account.updated` event was applied to the holding business.
    Updated { account_id: String },

    /// The event type or account is not ours to handle.
    Ignored,
}

/// Verify a `Stripe-Signature` header against the raw request body.
///
/// # Errors
///
/// `InvalidRequest` for a malformed header, a timestamp outside the
/// tolerance window, or a signature that does not match the payload.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = value.parse().ok();
            }
            Some(("v1", value)) => {
                if let Ok(decoded) = hex::decode(value) {
                    signatures.push(decoded);
                }
            }
            // Ignore v0 and any future scheme entries.
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        AppError::InvalidRequest("Malformed webhook signature header".to_string())
    })?;

    if signatures.is_empty() {
        return Err(AppError::InvalidRequest(
            "Malformed webhook signature header".to_string(),
        ));
    }

    if (now.timestamp() - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(AppError::InvalidRequest(
            "Webhook signature timestamp outside tolerance".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length is valid");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    // verify_slice compares in constant time.
    let verified = signatures
        .iter()
        .any(|candidate| mac.clone().verify_slice(candidate).is_ok());

    if !verified {
        return Err(AppError::InvalidRequest(
            "Webhook signature mismatch".to_string(),
        ));
    }

    Ok(())
}

/// Apply a verified event payload.
///
/// `account.updated` events re-derive and persist the status for the
/// business holding that account; everything else is acknowledged and
/// ignored, as are accounts no business holds.
pub async fn process_event(
    repo: &dyn BusinessRepository,
    payload: &[u8],
) -> Result<WebhookOutcome, AppError> {
    let event: StripeEvent = serde_json::from_slice(payload)
        .map_err(|e| AppError::InvalidRequest(format!("Malformed webhook event: {e}")))?;

    if event.event_type != "account.updated" {
        tracing::debug!("ignoring webhook event type {}", event.event_type);
        return Ok(WebhookOutcome::Ignored);
    }

    let account: StripeAccount = serde_json::from_value(event.data.object)
        .map_err(|e| AppError::InvalidRequest(format!("Malformed account payload: {e}")))?;
    let snapshot = AccountSnapshot::from(account);

    let Some(business) = repo.find_by_stripe_account(&snapshot.id).await? else {
        tracing::warn!("webhook for unknown account {}", snapshot.id);
        return Ok(WebhookOutcome::Ignored);
    };

    let status = payments_service::derive_status(&snapshot);
    payments_service::persist_snapshot(repo, &business, &snapshot, status).await?;

    tracing::info!(
        "account {} synced to {status} via webhook for business {}",
        snapshot.id,
        business.id
    );

    Ok(WebhookOutcome::Updated {
        account_id: snapshot.id,
    })
}

/// Event envelope, reduced to the fields we route on.
#[derive(Debug, Deserialize)]
struct StripeEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Value,
}
