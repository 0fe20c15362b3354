use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::borrow::Cow;
use std::fmt;

// ============ Accounts ============

/// Account status as stored. Only `Enabled` accounts may submit leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    Enabled,
    Disabled,
    /// Any other label found in the store, kept verbatim.
    Other(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Enabled => "Enabled",
            AccountStatus::Disabled => "Disabled",
            AccountStatus::Other(label) => label,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, AccountStatus::Enabled)
    }
}

impl From<String> for AccountStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Enabled" => AccountStatus::Enabled,
            "Disabled" => AccountStatus::Disabled,
            _ => AccountStatus::Other(value),
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant allowed to submit leads.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier (unique).
    pub aid: String,
    /// Opaque per-account API key.
    pub api_key: String,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    /// Source label copied onto every lead of this account.
    pub source: String,
    /// Vertical label copied onto every lead of this account.
    pub vertical: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }
}

/// Optional body of `POST /admin/api_key/:aid`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvisionRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub vertical: Option<String>,
}

/// Response of `POST /admin/api_key/:aid`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProvisionResponse {
    pub aid: String,
    pub api_key: String,
    pub message: String,
}

/// Body of `PUT /admin/accounts/:aid/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: AccountStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub aid: String,
    pub status: AccountStatus,
    pub message: String,
}

// ============ Leads ============

/// Inbound lead body: fixed required fields plus an open bag for anything else.
///
/// Required fields are `Option` here so that missing ones can be reported
/// together instead of failing on the first absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub aid: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mortgage_balance: Option<Value>,
    #[serde(default)]
    pub property_value: Option<Value>,
    #[serde(default)]
    pub opt_in_date: Option<Value>,
    #[serde(default)]
    pub ip_address: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Enriched lead as persisted. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub aid: String,
    pub first: String,
    pub last: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortgage_balance: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_in_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<Value>,
    pub source: String,
    pub vertical: String,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a successful intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadReceipt {
    pub id: uuid::Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadCreatedResponse {
    pub message: String,
    pub id: String,
}

/// Text form of an optional lead field, for the format validators.
///
/// Strings pass through, JSON numbers render to their decimal text,
/// anything else (bool, array, object) has no text form.
pub fn field_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_status_round_trip_keeps_unknown_labels() {
        let status: AccountStatus = serde_json::from_value(json!("Suspended")).unwrap();
        assert_eq!(status, AccountStatus::Other("Suspended".to_string()));
        assert!(!status.is_enabled());
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("Suspended"));

        let enabled: AccountStatus = serde_json::from_value(json!("Enabled")).unwrap();
        assert!(enabled.is_enabled());
    }

    #[test]
    fn test_submission_keeps_unknown_fields() {
        let submission: LeadSubmission = serde_json::from_value(json!({
            "aid": "A1",
            "first": "Jane",
            "mortgage_balance": 1200,
            "phone": "555-0100",
            "utm": {"campaign": "spring"}
        }))
        .unwrap();

        assert_eq!(submission.aid.as_deref(), Some("A1"));
        assert_eq!(submission.last, None);
        assert_eq!(submission.mortgage_balance, Some(json!(1200)));
        assert_eq!(submission.extra.get("phone"), Some(&json!("555-0100")));
        assert!(submission.extra.contains_key("utm"));
        assert!(!submission.extra.contains_key("aid"));
    }

    #[test]
    fn test_null_required_field_reads_as_missing() {
        let submission: LeadSubmission =
            serde_json::from_value(json!({"aid": "A1", "email": null})).unwrap();
        assert_eq!(submission.email, None);
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("1200.50")).as_deref(), Some("1200.50"));
        assert_eq!(field_text(&json!(1200)).as_deref(), Some("1200"));
        assert_eq!(field_text(&json!(true)), None);
        assert_eq!(field_text(&json!(["1"])), None);
    }

    #[test]
    fn test_lead_document_is_flat() {
        let mut extra = Map::new();
        extra.insert("phone".to_string(), json!("555-0100"));
        let lead = Lead {
            aid: "A1".to_string(),
            first: "Jane".to_string(),
            last: "Doe".to_string(),
            email: "j@d.com".to_string(),
            mortgage_balance: None,
            property_value: Some(json!("350000")),
            opt_in_date: None,
            ip_address: None,
            source: "web".to_string(),
            vertical: "mortgage".to_string(),
            received_at: Utc::now(),
            extra,
        };

        let doc = serde_json::to_value(&lead).unwrap();
        assert_eq!(doc["source"], "web");
        assert_eq!(doc["phone"], "555-0100");
        assert_eq!(doc["property_value"], "350000");
        assert!(doc.get("mortgage_balance").is_none());
    }
}
