use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Account, AccountStatus};
use crate::store::AccountStore;

/// Random bytes behind every generated API key.
const API_KEY_BYTES: usize = 32;

/// Label used when provisioning does not name a source or vertical.
pub const UNASSIGNED_LABEL: &str = "unassigned";

/// Account lookups for the guard and the intake pipeline, plus admin provisioning.
///
/// Every call goes to the store; nothing is cached.
#[derive(Clone)]
pub struct AccountDirectory {
    store: Arc<dyn AccountStore>,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub async fn find(&self, aid: &str) -> Result<Option<Account>, AppError> {
        self.store.find_account(aid).await
    }

    /// True iff `aid` names an Enabled account whose key is exactly `api_key`.
    pub async fn verify_key(&self, aid: &str, api_key: &str) -> Result<bool, AppError> {
        self.store.key_matches(aid, api_key).await
    }

    /// Creates an Enabled account with a freshly generated API key.
    pub async fn provision(
        &self,
        aid: &str,
        source: Option<String>,
        vertical: Option<String>,
    ) -> Result<Account, AppError> {
        if aid.trim().is_empty() {
            return Err(AppError::BadRequest("Account ID cannot be empty".to_string()));
        }

        let account = Account {
            aid: aid.to_string(),
            api_key: generate_api_key(),
            status: AccountStatus::Enabled,
            source: non_blank_or_unassigned(source),
            vertical: non_blank_or_unassigned(vertical),
            created_at: Utc::now(),
        };

        self.store.insert_account(&account).await?;

        tracing::info!(
            "✓ API key created for aid {} (key fingerprint {})",
            account.aid,
            key_fingerprint(&account.api_key)
        );
        Ok(account)
    }

    pub async fn set_status(&self, aid: &str, status: AccountStatus) -> Result<(), AppError> {
        if !self.store.update_status(aid, &status).await? {
            return Err(AppError::NotFound(format!("Account {} not found", aid)));
        }

        tracing::info!("Account {} status set to {}", aid, status);
        Ok(())
    }
}

fn non_blank_or_unassigned(label: Option<String>) -> String {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| UNASSIGNED_LABEL.to_string())
}

/// URL-safe random API key (32 bytes from the OS RNG, base64 without padding).
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Short SHA-256 fingerprint of a key, safe to log.
pub fn key_fingerprint(api_key: &str) -> String {
    let digest = Sha256::digest(api_key.as_bytes());
    hex::encode(&digest[..6])
}
