//! Business repository abstraction.
//!
//! Handlers and services read and write business records through the
//! `BusinessRepository` trait instead of issuing queries directly, so the
//! backing store can be swapped: Postgres in production (`postgres`), an
//! in-memory map for tests and local development (`memory`).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::business::Business;
use crate::models::payment_account::PaymentAccountUpdate;

pub use memory::MemoryBusinessRepository;
pub use postgres::PgBusinessRepository;

/// Errors surfaced by the repository.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The referenced business does not exist.
    #[error("business not found")]
    NotFound,

    /// The backing database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store of business records.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Fetch a business by id.
    async fn get(&self, business_id: Uuid) -> Result<Option<Business>, RepositoryError>;

    /// Fetch the business holding the given connected account id.
    async fn find_by_stripe_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Business>, RepositoryError>;

    /// Apply a partial update to a business's payment account fields.
    ///
    /// All set fields land in a single atomic row update; `None` fields
    /// keep their stored value. Fails with `NotFound` if the business does
    /// not exist.
    async fn update_payment_fields(
        &self,
        business_id: Uuid,
        update: PaymentAccountUpdate,
    ) -> Result<(), RepositoryError>;

    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
