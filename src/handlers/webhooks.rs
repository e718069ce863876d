//! Inbound payments webhook HTTP handler.
//!
//! Stripe delivers `account.updated` events here so connected-account
//! status changes land without waiting for an explicit sync.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::services::webhook_service;
use crate::state::AppState;

/// Receive a signed payments webhook event.
///
/// # Endpoint
///
/// `POST /api/v1/payments/webhook`
///
/// The body is consumed raw: the signature covers the exact bytes Stripe
/// sent, so the payload must not be re-serialized before verification.
///
/// # Response
///
/// - **Success (200 OK)**: `{ "received": true }` - also for event types
///   and account ids we do not track, so the provider stops retrying
/// - **Error (400)**: missing/invalid signature or malformed payload
pub async fn payments_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let secret = state.webhook_secret.as_deref().ok_or_else(|| {
        AppError::InvalidRequest("Webhook signature verification is not configured".to_string())
    })?;

    let signature = headers
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::InvalidRequest("Missing Stripe-Signature header".to_string())
        })?;

    webhook_service::verify_signature(secret, signature, &body, Utc::now())?;
    webhook_service::process_event(state.repo.as_ref(), &body).await?;

    Ok(Json(json!({ "received": true })))
}
