//! Shared application state.
//!
//! The router carries one `AppState` value, cloned per request. External
//! collaborators sit behind trait objects so tests can substitute an
//! in-memory repository and a stub payments client.

use std::sync::Arc;

use url::Url;

use crate::models::slots::SlotConfig;
use crate::payments::PaymentsClient;
use crate::repository::BusinessRepository;

/// State shared by all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store of business records
    pub repo: Arc<dyn BusinessRepository>,

    /// Client for the payments provider
    pub payments: Arc<dyn PaymentsClient>,

    /// Pickup slot generator configuration
    pub slots: SlotConfig,

    /// Public URL of the marketplace frontend, for onboarding links
    pub public_base: Url,

    /// Signing secret for inbound payments webhooks, when configured
    pub webhook_secret: Option<String>,
}
