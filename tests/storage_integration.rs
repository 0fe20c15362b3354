use std::env;
use std::sync::Arc;
use uuid::Uuid;

use lead_intake::config::FormatPolicy;
use lead_intake::data::db::Database;
use lead_intake::data::db_storage::PgStore;
use lead_intake::directory::AccountDirectory;
use lead_intake::intake::LeadIntake;
use lead_intake::models::{AccountStatus, LeadSubmission};

/// Integration smoke test for Postgres storage of accounts and leads.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn provision_and_store_lead_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let store = Arc::new(PgStore::new(db.pool.clone()));
    let directory = AccountDirectory::new(store.clone());
    let intake = LeadIntake::new(directory.clone(), store, FormatPolicy::Strict);

    // Use a unique aid to avoid conflicts on repeated runs.
    let aid = format!("smoke-{}", Uuid::new_v4());
    let account = directory
        .provision(&aid, Some("web".into()), Some("mortgage".into()))
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    assert!(directory
        .verify_key(&aid, &account.api_key)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?);

    let submission: LeadSubmission = serde_json::from_value(serde_json::json!({
        "aid": aid,
        "first": "Jane",
        "last": "Doe",
        "email": "j@d.com",
        "ip_address": "192.168.1.1"
    }))?;
    let receipt = intake
        .submit(submission)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert_ne!(receipt.id, Uuid::nil());

    let (source, vertical): (String, String) =
        sqlx::query_as("SELECT source, document->>'vertical' FROM leads WHERE id = $1")
            .bind(receipt.id)
            .fetch_one(&db.pool)
            .await?;
    assert_eq!(source, "web");
    assert_eq!(vertical, "mortgage");

    directory
        .set_status(&aid, AccountStatus::Disabled)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(!directory
        .verify_key(&aid, &account.api_key)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?);

    Ok(())
}
