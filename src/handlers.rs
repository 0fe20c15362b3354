use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::Config;
use crate::directory::AccountDirectory;
use crate::errors::AppError;
use crate::guard;
use crate::intake::LeadIntake;
use crate::models::{
    LeadCreatedResponse, LeadSubmission, ProvisionRequest, ProvisionResponse,
    StatusUpdateRequest, StatusUpdateResponse,
};

/// Shared application state injected into handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Account lookups and provisioning.
    pub directory: AccountDirectory,
    /// Validation, enrichment and persistence of submitted leads.
    pub intake: LeadIntake,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /admin/api_key/:aid
///
/// Creates an Enabled account with a new API key. Requires `X-Admin-Token`.
/// An empty body provisions with default labels; otherwise the body must be a
/// JSON `{source, vertical}` object sent as `application/json`.
pub async fn create_api_key(
    State(state): State<Arc<AppState>>,
    Path(aid): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ProvisionResponse>), AppError> {
    guard::require_admin(&headers, &state.config.secret_key)?;

    let ProvisionRequest { source, vertical } = parse_provision_body(&headers, &body)?;
    let account = state.directory.provision(&aid, source, vertical).await?;

    Ok((
        StatusCode::OK,
        Json(ProvisionResponse {
            aid: account.aid,
            api_key: account.api_key,
            message: "API key created successfully".to_string(),
        }),
    ))
}

/// Empty body means default labels; any other body must decode as JSON.
fn parse_provision_body(headers: &HeaderMap, body: &[u8]) -> Result<ProvisionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProvisionRequest::default());
    }

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"));
    if !is_json {
        return Err(AppError::BadRequest(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Rejected provisioning body: {}", e);
        AppError::BadRequest(format!("Invalid provisioning body: {}", e))
    })
}

/// PUT /admin/accounts/:aid/status
///
/// Enables or disables an account. Requires `X-Admin-Token`.
pub async fn update_account_status(
    State(state): State<Arc<AppState>>,
    Path(aid): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    guard::require_admin(&headers, &state.config.secret_key)?;

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    state.directory.set_status(&aid, request.status.clone()).await?;

    Ok(Json(StatusUpdateResponse {
        aid,
        status: request.status,
        message: "Account status updated".to_string(),
    }))
}

/// POST /api/leads
///
/// Runs the authorization guard on the `Authorization` header and the body's
/// `aid`, then hands the lead to the intake pipeline.
pub async fn add_lead(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<LeadCreatedResponse>), AppError> {
    let Json(body) = payload.map_err(|e| {
        tracing::warn!("Rejected lead body: {}", e.body_text());
        AppError::BadRequest("Request body must be a JSON object".to_string())
    })?;
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    guard::authorize(
        &state.directory,
        guard::presented_key(&headers),
        guard::presented_aid(&body),
    )
    .await?;

    tracing::info!(
        "Received lead submission ({} fields)",
        body.as_object().map_or(0, |o| o.len())
    );

    let submission: LeadSubmission = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid lead payload: {}", e)))?;

    let receipt = state.intake.submit(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(LeadCreatedResponse {
            message: "Lead added successfully".to_string(),
            id: receipt.id.to_string(),
        }),
    ))
}
