//! Wire types for the DNS provisioning boundary.
//!
//! These keep the original portal's camelCase wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CheckSubdomainPayload {
    pub subdomain: String,
}

#[derive(Debug, Serialize)]
pub struct CheckSubdomainResponse {
    pub available: bool,
}

/// Approval payload. `requestId` is authoritative; clients also echo the
/// record fields (`subdomain`, `recordType`, `targetValue`, `ttl`) but the
/// stored request is the snapshot that gets provisioned, so the echo is
/// ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordPayload {
    pub request_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordResponse {
    pub success: bool,
    pub fqdn: String,
    pub provider_record_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDnsRecordPayload {
    pub request_id: Uuid,
}

/// Deletion always answers HTTP 200; failures are reported in-band so
/// clients do not treat partial success (live local delete, failed provider
/// cleanup) as a hard error.
#[derive(Debug, Serialize)]
pub struct DeleteDnsRecordResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
