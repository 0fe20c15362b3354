use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::directory::AccountDirectory;
use crate::errors::AppError;

pub const MISSING_CREDENTIALS: &str = "Missing API key or Account ID";
pub const UNAUTHORIZED_ACCOUNT: &str = "Unauthorized or inactive account";

/// Header carrying the admin capability credential.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Presented API key from the `Authorization` header.
///
/// The raw key is expected; a `Bearer ` prefix is stripped if present.
pub fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let key = raw.strip_prefix("Bearer ").map(str::trim).unwrap_or(raw);
    (!key.is_empty()).then_some(key)
}

/// What the body carries under `aid`.
#[derive(Debug, PartialEq, Eq)]
enum AidField<'a> {
    Usable(&'a str),
    Absent,
    Blank,
    NotAString,
}

fn inspect_aid(body: &Value) -> AidField<'_> {
    match body.get("aid") {
        None | Some(Value::Null) => AidField::Absent,
        Some(Value::String(aid)) if aid.trim().is_empty() => AidField::Blank,
        Some(Value::String(aid)) => AidField::Usable(aid),
        Some(_) => AidField::NotAString,
    }
}

/// Account identifier from the request body; only a non-blank string counts.
pub fn presented_aid(body: &Value) -> Option<&str> {
    match inspect_aid(body) {
        AidField::Usable(aid) => Some(aid),
        AidField::NotAString => {
            tracing::warn!("Account ID present but not a string");
            None
        }
        AidField::Absent | AidField::Blank => None,
    }
}

/// Gate in front of every lead submission.
///
/// Missing key or account id is a bad request; a pair that does not match an
/// Enabled account is unauthorized. Returns the verified account id.
pub async fn authorize<'a>(
    directory: &AccountDirectory,
    api_key: Option<&str>,
    aid: Option<&'a str>,
) -> Result<&'a str, AppError> {
    let (Some(api_key), Some(aid)) = (api_key, aid) else {
        tracing::warn!("{}", MISSING_CREDENTIALS);
        return Err(AppError::BadRequest(MISSING_CREDENTIALS.to_string()));
    };

    if !directory.verify_key(aid, api_key).await? {
        tracing::warn!("{} (aid={})", UNAUTHORIZED_ACCOUNT, aid);
        return Err(AppError::Unauthorized(UNAUTHORIZED_ACCOUNT.to_string()));
    }

    Ok(aid)
}

/// Checks the `X-Admin-Token` header against the configured secret key.
pub fn require_admin(headers: &HeaderMap, secret_key: &str) -> Result<(), AppError> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-Admin-Token header".to_string()))?;

    if !constant_time_eq(token, secret_key) {
        tracing::warn!("Invalid admin token received");
        return Err(AppError::Unauthorized("Invalid admin token".to_string()));
    }

    Ok(())
}

/// Compares SHA-256 digests so neither length nor content leaks through timing.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
