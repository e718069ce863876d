//! PostgreSQL implementation of the business repository.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::business::Business;
use crate::models::payment_account::PaymentAccountUpdate;

use super::{BusinessRepository, RepositoryError};

const BUSINESS_COLUMNS: &str = "id, name, contact_email, business_hours, \
     stripe_account_id, stripe_account_status, payouts_enabled, details_submitted, \
     stripe_onboarding_completed_at, created_at, updated_at";

/// Repository backed by the `businesses` table.
pub struct PgBusinessRepository {
    pool: DbPool,
}

impl PgBusinessRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    async fn get(&self, business_id: Uuid) -> Result<Option<Business>, RepositoryError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn find_by_stripe_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Business>, RepositoryError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE stripe_account_id = $1"
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }

    async fn update_payment_fields(
        &self,
        business_id: Uuid,
        update: PaymentAccountUpdate,
    ) -> Result<(), RepositoryError> {
        // COALESCE keeps the stored value for fields the caller left unset,
        // and the single statement keeps the status/payouts pair atomic.
        let result = sqlx::query(
            r#"
            UPDATE businesses
            SET stripe_account_id = COALESCE($2, stripe_account_id),
                stripe_account_status = COALESCE($3, stripe_account_status),
                payouts_enabled = COALESCE($4, payouts_enabled),
                details_submitted = COALESCE($5, details_submitted),
                stripe_onboarding_completed_at = COALESCE($6, stripe_onboarding_completed_at),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(business_id)
        .bind(update.stripe_account_id)
        .bind(update.stripe_account_status.map(|s| s.as_str()))
        .bind(update.payouts_enabled)
        .bind(update.details_submitted)
        .bind(update.stripe_onboarding_completed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }
}
