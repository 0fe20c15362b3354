use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, ResultExt};
use crate::models::{Account, AccountStatus, Lead};
use crate::store::{AccountStore, LeadStore};

/// Postgres-backed storage for accounts and leads.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_account(&self, aid: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT aid, api_key, status, source, vertical, created_at
            FROM accounts
            WHERE aid = $1
            "#,
        )
        .bind(aid)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load account {}", aid))
    }

    async fn key_matches(&self, aid: &str, api_key: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM accounts
                WHERE aid = $1 AND api_key = $2 AND status = 'Enabled'
            )
            "#,
        )
        .bind(aid)
        .bind(api_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (aid, api_key, status, source, vertical, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&account.aid)
        .bind(&account.api_key)
        .bind(account.status.as_str())
        .bind(&account.source)
        .bind(&account.vertical)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!("Stored account aid={}", account.aid);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("Account {} already exists", account.aid)),
            ),
            Err(e) => Err::<(), _>(e).context("Failed to insert account"),
        }
    }

    async fn update_status(&self, aid: &str, status: &AccountStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE accounts SET status = $2 WHERE aid = $1")
            .bind(aid)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to update account status")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LeadStore for PgStore {
    async fn insert_lead(&self, lead: &Lead) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let document = serde_json::to_value(lead)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize lead: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO leads (id, aid, source, vertical, document, received_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&lead.aid)
        .bind(&lead.source)
        .bind(&lead.vertical)
        .bind(document)
        .bind(lead.received_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert lead")?;

        tracing::debug!("Stored lead id={} aid={}", id, lead.aid);
        Ok(id)
    }
}
