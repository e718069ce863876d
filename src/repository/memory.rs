//! In-memory implementation of the business repository.
//!
//! Backed by `Arc<RwLock<HashMap<Uuid, Business>>>` for shared concurrent
//! access. Used by the test suite and for local development without a
//! database; update semantics mirror the Postgres implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::business::Business;
use crate::models::payment_account::PaymentAccountUpdate;

use super::{BusinessRepository, RepositoryError};

/// A thread-safe in-memory store of business records.
#[derive(Default, Clone)]
pub struct MemoryBusinessRepository {
    businesses: Arc<RwLock<HashMap<Uuid, Business>>>,
}

impl MemoryBusinessRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a business record.
    pub async fn insert(&self, business: Business) {
        let mut businesses = self.businesses.write().await;
        businesses.insert(business.id, business);
    }
}

#[async_trait]
impl BusinessRepository for MemoryBusinessRepository {
    async fn get(&self, business_id: Uuid) -> Result<Option<Business>, RepositoryError> {
        let businesses = self.businesses.read().await;
        Ok(businesses.get(&business_id).cloned())
    }

    async fn find_by_stripe_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Business>, RepositoryError> {
        let businesses = self.businesses.read().await;
        Ok(businesses
            .values()
            .find(|b| b.stripe_account_id.as_deref() == Some(account_id))
            .cloned())
    }

    async fn update_payment_fields(
        &self,
        business_id: Uuid,
        update: PaymentAccountUpdate,
    ) -> Result<(), RepositoryError> {
        let mut businesses = self.businesses.write().await;
        let business = businesses
            .get_mut(&business_id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(account_id) = update.stripe_account_id {
            business.stripe_account_id = Some(account_id);
        }
        if let Some(status) = update.stripe_account_status {
            business.stripe_account_status = Some(status.as_str().to_string());
        }
        if let Some(payouts_enabled) = update.payouts_enabled {
            business.payouts_enabled = payouts_enabled;
        }
        if let Some(details_submitted) = update.details_submitted {
            business.details_submitted = details_submitted;
        }
        if let Some(completed_at) = update.stripe_onboarding_completed_at {
            business.stripe_onboarding_completed_at = Some(completed_at);
        }
        business.updated_at = Utc::now();

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment_account::AccountStatus;

    fn business(id: Uuid) -> Business {
        let now = Utc::now();
        Business {
            id,
            name: "Test Business".to_string(),
            contact_email: "owner@example.com".to_string(),
            business_hours: None,
            stripe_account_id: None,
            stripe_account_status: None,
            payouts_enabled: false,
            details_submitted: false,
            stripe_onboarding_completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn get_returns_inserted_business() {
        let repo = MemoryBusinessRepository::new();
        let id = Uuid::new_v4();
        repo.insert(business(id)).await;

        assert!(repo.get(id).await.unwrap().is_some());
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_applies_only_set_fields() {
        let repo = MemoryBusinessRepository::new();
        let id = Uuid::new_v4();
        repo.insert(business(id)).await;

        repo.update_payment_fields(
            id,
            PaymentAccountUpdate {
                stripe_account_id: Some("acct_1".to_string()),
                stripe_account_status: Some(AccountStatus::Pending),
                payouts_enabled: Some(false),
                details_submitted: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        repo.update_payment_fields(
            id,
            PaymentAccountUpdate {
                stripe_account_status: Some(AccountStatus::Verified),
                payouts_enabled: Some(true),
                details_submitted: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = repo.get(id).await.unwrap().unwrap();
        // account id untouched by the second partial update
        assert_eq!(stored.stripe_account_id.as_deref(), Some("acct_1"));
        assert_eq!(stored.stripe_account_status.as_deref(), Some("verified"));
        assert!(stored.payouts_enabled);
        assert!(stored.details_submitted);
    }

    #[tokio::test]
    async fn update_unknown_business_is_not_found() {
        let repo = MemoryBusinessRepository::new();
        let result = repo
            .update_payment_fields(Uuid::new_v4(), PaymentAccountUpdate::default())
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn find_by_stripe_account_matches_holder() {
        let repo = MemoryBusinessRepository::new();
        let id = Uuid::new_v4();
        let mut b = business(id);
        b.stripe_account_id = Some("acct_42".to_string());
        repo.insert(b).await;

        let found = repo.find_by_stripe_account("acct_42").await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(id));
        assert!(
            repo.find_by_stripe_account("acct_other")
                .await
                .unwrap()
                .is_none()
        );
    }
}
