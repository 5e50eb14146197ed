//! Subdomain request endpoints: create, list, admin listing and rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::endpoints::extractors::Authenticated;
use crate::error::{AppError, Result};
use crate::models::subdomain_request;
use crate::schemas::request::{CreateRequestPayload, RejectPayload};
use crate::services::requests::{self, NewRequest, RequestWithOwner};
use crate::services::{provisioning, roles};
use crate::state::AppState;

pub fn requests_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_my_requests).post(create_request))
        .route("/all", get(list_all_requests))
        .route("/{request_id}/reject", post(reject_request))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Submit a new subdomain request (status = pending)
async fn create_request(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<(StatusCode, Json<subdomain_request::Model>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = requests::create_request(
        &state.db,
        &state.dns,
        &state.base_domain,
        auth.user_id(),
        NewRequest {
            subdomain: payload.subdomain,
            record_type: payload.record_type,
            target_value: payload.target_value,
            ttl: payload.ttl,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's requests, newest first. Rejected requests are not shown.
async fn list_my_requests(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<Vec<subdomain_request::Model>>> {
    let requests = requests::list_for_owner(&state.db, auth.user_id()).await?;
    Ok(Json(requests))
}

/// Every request with the owner's profile. Admin only.
async fn list_all_requests(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<Vec<RequestWithOwner>>> {
    roles::require_admin(&state.db, auth.user_id()).await?;

    let requests = requests::list_all(&state.db).await?;
    Ok(Json(requests))
}

/// Reject a pending request. Admin only.
async fn reject_request(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<RejectPayload>,
) -> Result<Json<serde_json::Value>> {
    provisioning::reject(&state.db, auth.user(), request_id, payload.reason).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
