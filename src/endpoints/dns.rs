//! DNS provisioning boundary: availability check, record creation
//! (approval) and record deletion.

use axum::{extract::State, routing::post, Json, Router};

use crate::endpoints::extractors::Authenticated;
use crate::error::Result;
use crate::schemas::dns::{
    CheckSubdomainPayload, CheckSubdomainResponse, CreateDnsRecordPayload,
    CreateDnsRecordResponse, DeleteDnsRecordPayload, DeleteDnsRecordResponse,
};
use crate::services::{availability, provisioning};
use crate::state::AppState;

/// Public routes (no auth): the availability check.
pub fn dns_public_routes(state: AppState) -> Router {
    Router::new()
        .route("/check-subdomain", post(check_subdomain))
        .with_state(state)
}

/// Protected routes: record creation and deletion.
pub fn dns_routes(state: AppState) -> Router {
    Router::new()
        .route("/records", post(create_dns_record))
        .route("/records/delete", post(delete_dns_record))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Check whether a label is free in both the request store and the provider.
/// Too-short labels are rejected before any lookup happens.
async fn check_subdomain(
    State(state): State<AppState>,
    Json(payload): Json<CheckSubdomainPayload>,
) -> Result<Json<CheckSubdomainResponse>> {
    let result = availability::check_availability(
        &state.db,
        &state.dns,
        &state.base_domain,
        &payload.subdomain,
    )
    .await?;

    Ok(Json(CheckSubdomainResponse {
        available: result.available,
    }))
}

/// Approve a pending request by materializing its DNS record. Admin only;
/// on failure the request stays pending and the admin may retry.
async fn create_dns_record(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(payload): Json<CreateDnsRecordPayload>,
) -> Result<Json<CreateDnsRecordResponse>> {
    let outcome = provisioning::approve(
        &state.db,
        &state.dns,
        &state.reconciler,
        &state.base_domain,
        auth.user(),
        payload.request_id,
    )
    .await?;

    Ok(Json(CreateDnsRecordResponse {
        success: true,
        fqdn: outcome.fqdn,
        provider_record_id: outcome.provider_record_id,
    }))
}

/// Delete a request and its DNS record. Owner or admin.
///
/// Always answers HTTP 200; failures are reported in-band (see schema).
async fn delete_dns_record(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(payload): Json<DeleteDnsRecordPayload>,
) -> Json<DeleteDnsRecordResponse> {
    match provisioning::delete_request(&state.db, &state.dns, auth.user(), payload.request_id)
        .await
    {
        Ok(outcome) => Json(DeleteDnsRecordResponse {
            success: true,
            error: outcome.provider_warning,
        }),
        Err(e) => Json(DeleteDnsRecordResponse {
            success: false,
            error: Some(e.to_string()),
        }),
    }
}
