//! Provisioning engine: approval, rejection and deletion orchestration.
//!
//! Approval is a two-system write (DNS provider, then local database) with no
//! spanning transaction. Failure ordering is deliberate:
//!
//! - provider create fails → nothing changed locally, the request stays
//!   pending and the admin may retry;
//! - local persistence fails after the provider record exists → the orphaned
//!   provider record is handed to the reconciler for compensating deletion,
//!   returning the request to a retryable pending state.
//!
//! Deletion treats the local database as the source of truth: provider-side
//! cleanup is best effort and its failure is reported in-band, never fatal.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::dns_record;
use crate::models::prelude::*;
use crate::models::subdomain_request::STATUS_PENDING;
use crate::models::user;
use crate::services::provider::{CreateRecordRequest, DynDnsProvider};
use crate::services::reconcile::{ReconcileTask, Reconciler};
use crate::services::validation::RecordType;
use crate::services::{requests, roles};
use crate::state::DbConn;

#[derive(Debug, Clone)]
pub struct ApproveOutcome {
    pub fqdn: String,
    pub provider_record_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    /// Set when the provider-side cleanup failed; the local deletion still
    /// succeeded.
    pub provider_warning: Option<String>,
}

/// Approve a pending request: create the provider record, persist the
/// linkage, then mark the request approved.
pub async fn approve(
    db: &DbConn,
    dns: &DynDnsProvider,
    reconciler: &Reconciler,
    base_domain: &str,
    admin: &user::Model,
    request_id: Uuid,
) -> Result<ApproveOutcome> {
    roles::require_admin(db, admin.id).await?;

    let request = requests::get_request(db, request_id).await?;
    if request.status != STATUS_PENDING {
        return Err(AppError::InvalidTransition(format!(
            "Request is {}, not pending",
            request.status
        )));
    }

    let record_type = RecordType::parse(&request.record_type)?;
    let fqdn = format!("{}.{}", request.subdomain, base_domain);

    tracing::info!(
        "Approving request {}: {} {} -> {}",
        request.id,
        record_type,
        fqdn,
        request.target_value
    );

    let created = dns
        .create_record(&CreateRecordRequest {
            record_type,
            fqdn: fqdn.clone(),
            content: request.target_value.clone(),
            ttl: request.ttl,
            proxied: false,
        })
        .await
        .map_err(|e| match e {
            AppError::Upstream(msg) => AppError::Provisioning(msg),
            other => other,
        })?;

    // The provider record now exists; every failure below must compensate by
    // deleting it, or it becomes an unreachable orphan.
    let link = dns_record::ActiveModel {
        request_id: Set(request.id),
        fqdn: Set(fqdn.clone()),
        record_type: Set(request.record_type.clone()),
        target_value: Set(request.target_value.clone()),
        ttl: Set(request.ttl),
        provider_record_id: Set(created.id.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    if let Err(e) = link.insert(db).await {
        tracing::error!(
            "Provider record {} created for {} but local linkage write failed: {}",
            created.id,
            fqdn,
            e
        );
        reconciler.enqueue(ReconcileTask::DeleteOrphanRecord {
            provider_record_id: created.id,
            fqdn,
        });
        return Err(AppError::Provisioning(
            "DNS record was created upstream but could not be recorded; the orphaned record is being cleaned up, retry shortly".to_string(),
        ));
    }

    if let Err(e) = requests::set_approved(db, request.id, admin.id).await {
        // Another admin decided concurrently. Roll back our half of the
        // approval: drop the linkage row and compensate the provider record.
        let _ = DnsRecord::delete_many()
            .filter(dns_record::Column::RequestId.eq(request.id))
            .filter(dns_record::Column::ProviderRecordId.eq(created.id.clone()))
            .exec(db)
            .await;
        reconciler.enqueue(ReconcileTask::DeleteOrphanRecord {
            provider_record_id: created.id,
            fqdn,
        });
        return Err(e);
    }

    Ok(ApproveOutcome {
        fqdn,
        provider_record_id: created.id,
    })
}

/// Reject a pending request. No external calls.
pub async fn reject(
    db: &DbConn,
    admin: &user::Model,
    request_id: Uuid,
    reason: Option<String>,
) -> Result<()> {
    roles::require_admin(db, admin.id).await?;

    let request = requests::get_request(db, request_id).await?;
    tracing::info!("Rejecting request {} ({})", request.id, request.subdomain);

    requests::set_rejected(db, request_id, reason).await
}

/// Delete a request and its DNS record, if any. Allowed for the request's
/// owner and for admins.
///
/// The provider delete and the local delete run concurrently; only a local
/// failure fails the operation.
pub async fn delete_request(
    db: &DbConn,
    dns: &DynDnsProvider,
    caller: &user::Model,
    request_id: Uuid,
) -> Result<DeleteOutcome> {
    let link = DnsRecord::find()
        .filter(dns_record::Column::RequestId.eq(request_id))
        .one(db)
        .await?;

    let request = requests::get_request(db, request_id).await?;

    if !roles::is_owner(request.user_id, caller.id) && !roles::is_admin(db, caller.id).await? {
        return Err(AppError::Forbidden(
            "You do not have permission to delete this request".to_string(),
        ));
    }

    let provider_cleanup = async {
        match &link {
            Some(record) => dns.delete_record(&record.provider_record_id).await.err(),
            None => None,
        }
    };

    let local_delete = async {
        DnsRecord::delete_many()
            .filter(dns_record::Column::RequestId.eq(request_id))
            .exec(db)
            .await?;
        SubdomainRequest::delete_by_id(request_id).exec(db).await?;
        Ok::<(), AppError>(())
    };

    let (provider_err, local_result) = tokio::join!(provider_cleanup, local_delete);

    // Local deletion is authoritative for "does this still exist".
    local_result?;

    let provider_warning = provider_err.map(|e| {
        tracing::warn!(
            "Failed to delete provider record for request {}: {}",
            request_id,
            e
        );
        format!("DNS provider cleanup failed: {}", e)
    });

    tracing::info!("Deleted request {} ({})", request_id, request.subdomain);

    Ok(DeleteOutcome { provider_warning })
}
