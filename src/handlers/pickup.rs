//! Pickup slot HTTP handler.
//!
//! Implements `GET /api/v1/businesses/{id}/pickup-slots`: the slot picker
//! on the storefront queries this to offer customers a pickup time.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{FixedOffset, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::slots::{PickupSlotsResponse, SlotConfig};
use crate::services::pickup_service;
use crate::state::AppState;

/// List the offerable pickup slots for a business.
///
/// # Endpoint
///
/// `GET /api/v1/businesses/{id}/pickup-slots`
///
/// # Response
///
/// - **Success (200 OK)**: slots over the configured horizon, ordered by
///   date and time. An empty list means no availability and is not an
///   error - the business may simply be closed for the rest of the
///   horizon or have declared no hours at all.
/// - **Error (404)**: unknown business
///
/// ```json
/// {
///   "slots": [
///     { "date": "2026-08-03", "time": "12:30:00", "label": "Mon, Aug 3 at 12:30 PM" }
///   ]
/// }
/// ```
pub async fn list_pickup_slots(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> Result<Json<PickupSlotsResponse>, AppError> {
    let business = state
        .repo
        .get(business_id)
        .await?
        .ok_or(AppError::BusinessNotFound)?;

    let hours = business.hours();
    let now = local_now(&state.slots);
    let slots = pickup_service::generate_slots(&hours, now, &state.slots).collect();

    Ok(Json(PickupSlotsResponse { slots }))
}

/// The current moment on the businesses' local clock.
fn local_now(config: &SlotConfig) -> NaiveDateTime {
    let offset = FixedOffset::east_opt(config.local_utc_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));

    Utc::now().with_timezone(&offset).naive_local()
}
