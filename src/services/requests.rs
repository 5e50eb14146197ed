//! Request store: the durable table of subdomain requests and its state
//! machine.
//!
//! Transitions are `pending -> approved` and `pending -> rejected`, each
//! applied exactly once via a conditional update so two admins acting
//! concurrently cannot overwrite each other. Deletion is not a transition;
//! it removes the row (and any linked DNS record row) from any state.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::subdomain_request::{
    self, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use crate::models::user;
use crate::services::availability::check_availability;
use crate::services::policy::{self, PlanTier};
use crate::services::provider::DynDnsProvider;
use crate::services::validation::{validate_label, validate_ttl, RecordData, RecordType};
use crate::state::DbConn;

/// Validated input for a new request.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub subdomain: String,
    pub record_type: String,
    pub target_value: String,
    pub ttl: i64,
}

/// A request joined with its owner's display profile (admin listing).
#[derive(Debug, Clone, serde::Serialize)]
pub struct RequestWithOwner {
    #[serde(flatten)]
    pub request: subdomain_request::Model,
    pub profile: Option<OwnerProfile>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct OwnerProfile {
    pub email: String,
    pub full_name: Option<String>,
}

/// Create a request in `pending` after validation, plan policy and
/// availability checks. The unique-violation fallback turns the
/// check-then-act race between concurrent creates into a `Conflict`.
pub async fn create_request(
    db: &DbConn,
    dns: &DynDnsProvider,
    base_domain: &str,
    owner_id: i64,
    input: NewRequest,
) -> Result<subdomain_request::Model> {
    let label = validate_label(&input.subdomain)?;
    let record_type = RecordType::parse(&input.record_type)?;
    RecordData::parse(record_type, &input.target_value)?;
    validate_ttl(input.ttl)?;

    let tier = policy::tier_for_user(db, owner_id).await?;
    check_policy(tier, record_type, input.ttl)?;

    let availability = check_availability(db, dns, base_domain, &label).await?;
    if !availability.available {
        return Err(AppError::Conflict(format!(
            "Subdomain '{}' is not available",
            label
        )));
    }

    let now = Utc::now();
    let request = subdomain_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(owner_id),
        subdomain: Set(label.clone()),
        record_type: Set(record_type.as_str().to_string()),
        target_value: Set(input.target_value.trim().to_string()),
        ttl: Set(input.ttl),
        status: Set(STATUS_PENDING.to_string()),
        reason: Set(None),
        created_at: Set(now),
        approved_at: Set(None),
        approved_by: Set(None),
    };

    match request.insert(db).await {
        Ok(model) => Ok(model),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::Conflict(format!(
                "Subdomain '{}' is not available",
                label
            ))),
            _ => Err(e.into()),
        },
    }
}

fn check_policy(tier: PlanTier, record_type: RecordType, ttl: i64) -> Result<()> {
    if !policy::record_type_allowed(tier, record_type) {
        return Err(AppError::PolicyViolation(format!(
            "{} records require a pro plan",
            record_type
        )));
    }
    if !policy::ttl_allowed(tier, ttl) {
        return Err(AppError::PolicyViolation(
            "Custom TTL values require a pro plan".to_string(),
        ));
    }
    Ok(())
}

/// All of an owner's requests, newest first. Rejected requests are hidden
/// from the owner-facing list (their labels are free again).
pub async fn list_for_owner(
    db: &DbConn,
    owner_id: i64,
) -> Result<Vec<subdomain_request::Model>> {
    let requests = SubdomainRequest::find()
        .filter(subdomain_request::Column::UserId.eq(owner_id))
        .filter(subdomain_request::Column::Status.ne(STATUS_REJECTED))
        .order_by_desc(subdomain_request::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(requests)
}

/// Every request, newest first, joined with the owner's display profile.
/// Administrator-only; the caller enforces the gate.
pub async fn list_all(db: &DbConn) -> Result<Vec<RequestWithOwner>> {
    let requests = SubdomainRequest::find()
        .order_by_desc(subdomain_request::Column::CreatedAt)
        .all(db)
        .await?;

    let owner_ids: Vec<i64> = {
        let mut ids: Vec<i64> = requests.iter().map(|r| r.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };

    let owners = User::find()
        .filter(user::Column::Id.is_in(owner_ids))
        .all(db)
        .await?;

    Ok(requests
        .into_iter()
        .map(|request| {
            let profile = owners
                .iter()
                .find(|u| u.id == request.user_id)
                .map(|u| OwnerProfile {
                    email: u.email.clone(),
                    full_name: u.full_name.clone(),
                });
            RequestWithOwner { request, profile }
        })
        .collect())
}

pub async fn get_request(db: &DbConn, id: Uuid) -> Result<subdomain_request::Model> {
    SubdomainRequest::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".to_string()))
}

/// Atomically transition `pending -> approved`. The update is conditioned on
/// the status still being pending; zero affected rows means another admin
/// already acted.
pub async fn set_approved(db: &DbConn, id: Uuid, admin_id: i64) -> Result<()> {
    let result = SubdomainRequest::update_many()
        .col_expr(
            subdomain_request::Column::Status,
            Expr::value(STATUS_APPROVED),
        )
        .col_expr(
            subdomain_request::Column::ApprovedAt,
            Expr::value(Utc::now()),
        )
        .col_expr(subdomain_request::Column::ApprovedBy, Expr::value(admin_id))
        .filter(subdomain_request::Column::Id.eq(id))
        .filter(subdomain_request::Column::Status.eq(STATUS_PENDING))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::InvalidTransition(
            "Request is no longer pending".to_string(),
        ));
    }
    Ok(())
}

/// Atomically transition `pending -> rejected` with an optional reason.
pub async fn set_rejected(db: &DbConn, id: Uuid, reason: Option<String>) -> Result<()> {
    let reason = reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| "Request rejected by admin".to_string());

    let result = SubdomainRequest::update_many()
        .col_expr(
            subdomain_request::Column::Status,
            Expr::value(STATUS_REJECTED),
        )
        .col_expr(subdomain_request::Column::Reason, Expr::value(reason))
        .filter(subdomain_request::Column::Id.eq(id))
        .filter(subdomain_request::Column::Status.eq(STATUS_PENDING))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::InvalidTransition(
            "Request is no longer pending".to_string(),
        ));
    }
    Ok(())
}
