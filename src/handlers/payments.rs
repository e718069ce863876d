//! Payment account HTTP handlers.
//!
//! This module implements the payment-related API endpoints:
//! - POST /api/v1/payments/accounts - Start payment onboarding
//! - POST /api/v1/payments/accounts/sync - Re-derive account status
//! - POST /api/v1/payments/onboarding-link - Mint an onboarding URL

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::error::AppError;
use crate::models::payment_account::{
    AccountStatusResponse, CreateAccountRequest, CreateAccountResponse, OnboardingLinkRequest,
    OnboardingLinkResponse, SyncAccountRequest,
};
use crate::services::payments_service;
use crate::state::AppState;

/// Start payment onboarding for a business.
///
/// # Endpoint
///
/// `POST /api/v1/payments/accounts`
///
/// # Request Body
///
/// ```json
/// {
///   "businessId": "550e8400-e29b-41d4-a716-446655440000",
///   "email": "owner@example.com",
///   "businessName": "Gresham Coffee Roasters"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: a new connected account was provisioned
/// - **Success (200 OK)**: the business already held an account; its id is
///   returned and no duplicate is created
/// - **Error (400)**: blank email or business name
/// - **Error (404)**: unknown business
///
/// ```json
/// { "accountId": "acct_1GqzXp2eZvKYlo2C" }
/// ```
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = payments_service::create_account(
        state.repo.as_ref(),
        state.payments.as_ref(),
        request.business_id,
        &request.email,
        &request.business_name,
    )
    .await?;

    let status = if created.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(CreateAccountResponse {
            account_id: created.account_id,
        }),
    ))
}

/// Re-derive an account's status from the payments provider.
///
/// # Endpoint
///
/// `POST /api/v1/payments/accounts/sync`
///
/// # Request Body
///
/// `businessId` is optional; when present, the derived status is also
/// persisted to the business record.
///
/// ```json
/// {
///   "accountId": "acct_1GqzXp2eZvKYlo2C",
///   "businessId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: current derived status and outstanding
///   requirements
/// - **Error (400)**: account held by a different business
/// - **Error (404)**: unknown business or payments account
///
/// ```json
/// {
///   "accountStatus": "pending",
///   "payoutsEnabled": false,
///   "detailsSubmitted": false,
///   "requirements": ["external_account"]
/// }
/// ```
pub async fn sync_account_status(
    State(state): State<AppState>,
    Json(request): Json<SyncAccountRequest>,
) -> Result<Json<AccountStatusResponse>, AppError> {
    let synced = payments_service::sync_account_status(
        state.repo.as_ref(),
        state.payments.as_ref(),
        &request.account_id,
        request.business_id,
    )
    .await?;

    Ok(Json(AccountStatusResponse {
        account_status: synced.account.status,
        payouts_enabled: synced.account.payouts_enabled,
        details_submitted: synced.account.details_submitted,
        requirements: synced.requirements,
        onboarding_completed_at: synced.account.onboarding_completed_at,
    }))
}

/// Mint a fresh onboarding link for a business's account.
///
/// # Endpoint
///
/// `POST /api/v1/payments/onboarding-link`
///
/// Onboarding links are short-lived; the dashboard requests a new one
/// every time the owner resumes identity/bank verification.
///
/// # Response
///
/// - **Success (200 OK)**: `{ "url": "https://connect.stripe.com/setup/..." }`
/// - **Error (400)**: account not held by the business, or rejected by
///   the provider
/// - **Error (404)**: unknown business
pub async fn create_onboarding_link(
    State(state): State<AppState>,
    Json(request): Json<OnboardingLinkRequest>,
) -> Result<Json<OnboardingLinkResponse>, AppError> {
    let url = payments_service::create_onboarding_link(
        state.repo.as_ref(),
        state.payments.as_ref(),
        &state.public_base,
        &request.account_id,
        request.business_id,
    )
    .await?;

    Ok(Json(OnboardingLinkResponse { url }))
}
