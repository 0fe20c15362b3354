//! Lead intake pipeline.
//!
//! One pass per submission:
//! 1. Required fields (`aid`, `first`, `last`, `email`)
//! 2. Format checks on the optional fields that are present
//! 3. Account resolution (must exist and be Enabled)
//! 4. Enrichment with the account's `source` and `vertical`
//! 5. Persistence
//!
//! Authorization happens before this, in `guard`.

use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::config::FormatPolicy;
use crate::directory::AccountDirectory;
use crate::errors::AppError;
use crate::models::{field_text, Account, Lead, LeadReceipt, LeadSubmission};
use crate::store::LeadStore;
use crate::validators::{is_numeric, is_valid_date, is_valid_ipv4};

pub const REQUIRED_FIELDS: [&str; 4] = ["aid", "first", "last", "email"];

/// Keys the stored document sets itself; caller values for them are dropped.
const RESERVED_KEYS: [&str; 3] = ["source", "vertical", "received_at"];

#[derive(Clone)]
pub struct LeadIntake {
    directory: AccountDirectory,
    leads: Arc<dyn LeadStore>,
    policy: FormatPolicy,
}

impl LeadIntake {
    pub fn new(directory: AccountDirectory, leads: Arc<dyn LeadStore>, policy: FormatPolicy) -> Self {
        Self {
            directory,
            leads,
            policy,
        }
    }

    pub async fn submit(&self, submission: LeadSubmission) -> Result<LeadReceipt, AppError> {
        let missing = missing_required_fields(&submission);
        if !missing.is_empty() {
            tracing::warn!("Missing required fields: {:?}", missing);
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let invalid = invalid_format_fields(&submission);
        if !invalid.is_empty() {
            match self.policy {
                FormatPolicy::Strict => {
                    tracing::warn!("Invalid data format in submission: {:?}", invalid);
                    return Err(AppError::BadRequest(format!(
                        "Invalid field format: {}",
                        invalid.join(", ")
                    )));
                }
                FormatPolicy::Lenient => {
                    tracing::error!(
                        "Invalid data format in submission (accepted, lenient policy): {:?}",
                        invalid
                    );
                }
            }
        }

        // Presence was checked above
        let aid = submission.aid.as_deref().unwrap_or_default();
        let account = match self.directory.find(aid).await? {
            Some(account) if account.is_enabled() => account,
            _ => {
                tracing::error!("Account not found or not enabled for aid {}", aid);
                return Err(AppError::NotFound(
                    "Account not found or not enabled".to_string(),
                ));
            }
        };

        let lead = enrich(submission, &account)?;
        let id = self.leads.insert_lead(&lead).await?;

        tracing::info!(
            "Lead added successfully: {} (aid={}, source={}, vertical={})",
            id,
            lead.aid,
            lead.source,
            lead.vertical
        );
        Ok(LeadReceipt { id })
    }
}

/// Required fields that are absent or null, in canonical order.
pub fn missing_required_fields(submission: &LeadSubmission) -> Vec<&'static str> {
    let present = [
        submission.aid.is_some(),
        submission.first.is_some(),
        submission.last.is_some(),
        submission.email.is_some(),
    ];

    REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(field, _)| *field)
        .collect()
}

/// Optional fields that are present but fail their format check.
pub fn invalid_format_fields(submission: &LeadSubmission) -> Vec<&'static str> {
    let checks: [(&'static str, &Option<Value>, fn(Option<&str>) -> bool); 4] = [
        ("mortgage_balance", &submission.mortgage_balance, is_numeric),
        ("property_value", &submission.property_value, is_numeric),
        ("opt_in_date", &submission.opt_in_date, is_valid_date),
        ("ip_address", &submission.ip_address, is_valid_ipv4),
    ];

    checks
        .into_iter()
        .filter_map(|(name, value, check)| {
            let value = value.as_ref()?;
            let text = field_text(value);
            (!check(text.as_deref())).then_some(name)
        })
        .collect()
}

/// Builds the stored lead, taking `source` and `vertical` from the account.
fn enrich(submission: LeadSubmission, account: &Account) -> Result<Lead, AppError> {
    let LeadSubmission {
        aid,
        first,
        last,
        email,
        mortgage_balance,
        property_value,
        opt_in_date,
        ip_address,
        mut extra,
    } = submission;

    for key in RESERVED_KEYS {
        if extra.remove(key).is_some() {
            tracing::debug!("Discarded caller-supplied '{}' for aid {}", key, account.aid);
        }
    }

    let (Some(aid), Some(first), Some(last), Some(email)) = (aid, first, last, email) else {
        return Err(AppError::InternalError(
            "Required lead fields vanished after validation".to_string(),
        ));
    };

    Ok(Lead {
        aid,
        first,
        last,
        email,
        mortgage_balance,
        property_value,
        opt_in_date,
        ip_address,
        source: account.source.clone(),
        vertical: account.vertical.clone(),
        received_at: Utc::now(),
        extra,
    })
}
