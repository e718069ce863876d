//! Try Local Gresham - marketplace core services.
//!
//! HTTP service behind the local-business marketplace, covering its two
//! structured flows:
//!
//! - **Pickup scheduling**: computes the future pickup slots a customer
//!   may choose from a business's declared weekly hours. Pure logic in
//!   [`services::pickup_service`].
//! - **Payment account lifecycle**: tracks a business's Stripe Connect
//!   account from none → pending → verified | restricted, driven by the
//!   payments API and persisted atomically on the business record.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Payments**: Stripe REST API behind the [`payments::PaymentsClient`]
//!   trait
//! - **Format**: JSON requests/responses, camelCase for the React frontend
//!
//! External collaborators sit behind traits ([`payments::PaymentsClient`],
//! [`repository::BusinessRepository`]) so the router can be exercised in
//! tests with an in-memory store and a stub payments client.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payments;
pub mod repository;
pub mod services;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the HTTP router for the given application state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public health endpoint
        .route("/health", get(handlers::health::health_check))
        // Pickup scheduling
        .route(
            "/api/v1/businesses/{id}/pickup-slots",
            get(handlers::pickup::list_pickup_slots),
        )
        // Payment account lifecycle
        .route(
            "/api/v1/payments/accounts",
            post(handlers::payments::create_account),
        )
        .route(
            "/api/v1/payments/accounts/sync",
            post(handlers::payments::sync_account_status),
        )
        .route(
            "/api/v1/payments/onboarding-link",
            post(handlers::payments::create_onboarding_link),
        )
        .route(
            "/api/v1/payments/webhook",
            post(handlers::webhooks::payments_webhook),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // The storefront and dashboard are browser apps on another origin
        .layer(CorsLayer::permissive())
        // Share state with all handlers via State extraction
        .with_state(state)
}
