//! Availability oracle: is a label free to request?
//!
//! Consults the request store and the DNS provider concurrently. Read-only
//! and side-effect free — it does not reserve the name; the partial unique
//! index on `subdomain_requests` is the authoritative conflict check at
//! insert time.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::error::Result;
use crate::models::prelude::*;
use crate::models::subdomain_request::{self, STATUS_REJECTED};
use crate::services::provider::DynDnsProvider;
use crate::services::validation::validate_label;
use crate::state::DbConn;

/// Where a taken label was found. Callers only see the boolean; the source
/// is logged for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakenSource {
    Database,
    Provider,
}

#[derive(Debug, Clone, Copy)]
pub struct Availability {
    pub available: bool,
    pub source: Option<TakenSource>,
}

/// Check whether a label is free, consulting both the request store and the
/// provider. Fails with a validation error before any I/O if the label is
/// malformed or too short, and with an upstream error if the provider query
/// fails — a provider failure is never treated as "available".
pub async fn check_availability(
    db: &DbConn,
    dns: &DynDnsProvider,
    base_domain: &str,
    label: &str,
) -> Result<Availability> {
    let label = validate_label(label)?;
    let fqdn = format!("{}.{}", label, base_domain);

    tracing::debug!("Checking availability for {}", fqdn);

    // Independent reads, issued concurrently to bound latency.
    let db_check = SubdomainRequest::find()
        .filter(subdomain_request::Column::Subdomain.eq(&label))
        .filter(subdomain_request::Column::Status.ne(STATUS_REJECTED))
        .count(db);
    let provider_check = dns.find_records(&fqdn);

    let (db_result, provider_result) = tokio::join!(db_check, provider_check);

    if db_result? > 0 {
        tracing::info!("Label {} taken by an existing request", label);
        return Ok(Availability {
            available: false,
            source: Some(TakenSource::Database),
        });
    }

    if !provider_result?.is_empty() {
        tracing::info!("Label {} taken by a live provider record", label);
        return Ok(Availability {
            available: false,
            source: Some(TakenSource::Provider),
        });
    }

    Ok(Availability {
        available: true,
        source: None,
    })
}
