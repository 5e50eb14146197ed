//! DNS provider abstraction.
//!
//! The concrete client is constructed once at startup and threaded through
//! `AppState` as a trait object; tests substitute a mock implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::validation::RecordType;

/// A record as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub ttl: i64,
}

/// Parameters for creating a provider-side record.
#[derive(Debug, Clone)]
pub struct CreateRecordRequest {
    pub record_type: RecordType,
    /// Fully qualified name, `label.base_domain`.
    pub fqdn: String,
    pub content: String,
    pub ttl: i64,
    pub proxied: bool,
}

/// Remote DNS provider operations the provisioning pipeline needs.
///
/// Every call is bounded by the client's configured timeout; a timeout or
/// transport failure surfaces as an `Upstream` error, never as a silent
/// default.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List live records matching an exact FQDN.
    async fn find_records(&self, fqdn: &str) -> Result<Vec<ProviderRecord>>;

    /// Create a record, returning the provider's view of it (including the
    /// provider-side id needed for later deletion).
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ProviderRecord>;

    /// Delete a record by its provider-side id.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}

pub type DynDnsProvider = Arc<dyn DnsProvider>;
