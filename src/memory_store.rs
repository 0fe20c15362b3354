use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Account, AccountStatus, Lead};
use crate::store::{AccountStore, LeadStore};

/// Process-local store with the same semantics as `PgStore`.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
    leads: RwLock<Vec<(Uuid, Lead)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored leads in insertion order.
    pub async fn leads(&self) -> Vec<(Uuid, Lead)> {
        self.leads.read().await.clone()
    }

    pub async fn lead(&self, id: Uuid) -> Option<Lead> {
        self.leads
            .read()
            .await
            .iter()
            .find(|(lead_id, _)| *lead_id == id)
            .map(|(_, lead)| lead.clone())
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn find_account(&self, aid: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.get(aid).cloned())
    }

    async fn key_matches(&self, aid: &str, api_key: &str) -> Result<bool, AppError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(aid)
            .is_some_and(|a| a.api_key == api_key && a.is_enabled()))
    }

    async fn insert_account(&self, account: &Account) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.aid) {
            return Err(AppError::Conflict(format!(
                "Account {} already exists",
                account.aid
            )));
        }
        accounts.insert(account.aid.clone(), account.clone());
        Ok(())
    }

    async fn update_status(&self, aid: &str, status: &AccountStatus) -> Result<bool, AppError> {
        Ok(match self.accounts.write().await.get_mut(aid) {
            Some(account) => {
                account.status = status.clone();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl LeadStore for InMemoryStore {
    async fn insert_lead(&self, lead: &Lead) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.leads.write().await.push((id, lead.clone()));
        Ok(id)
    }
}
