//! Storage seams for the two record kinds the service touches.
//!
//! `PgStore` (see `db_storage`) is the production implementation;
//! `InMemoryStore` (see `memory_store`) backs tests and local runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Account, AccountStatus, Lead};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Account with this identifier, if any.
    async fn find_account(&self, aid: &str) -> Result<Option<Account>, AppError>;

    /// Whether an Enabled account exists with exactly this identifier and key.
    async fn key_matches(&self, aid: &str, api_key: &str) -> Result<bool, AppError>;

    /// Inserts a new account. Fails with `Conflict` if the identifier is taken.
    async fn insert_account(&self, account: &Account) -> Result<(), AppError>;

    /// Sets the status of an existing account. Returns `false` if none matched.
    async fn update_status(&self, aid: &str, status: &AccountStatus) -> Result<bool, AppError>;
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persists a lead as a new record and returns its generated identifier.
    async fn insert_lead(&self, lead: &Lead) -> Result<Uuid, AppError>;
}
