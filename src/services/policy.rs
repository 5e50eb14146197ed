//! Subscription plan policy: which record types and TTLs each tier may use.
//!
//! The display layer gates on the same rules, but that gate is advisory only;
//! these checks run server-side before any state mutation.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::error::Result;
use crate::models::prelude::*;
use crate::models::subscription;
use crate::services::validation::RecordType;
use crate::state::DbConn;

/// Subscription tier. Pro and enterprise collapse to the same policy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTier {
    Free,
    Pro,
    Enterprise,
}

impl PlanTier {
    pub fn from_plan(plan: &str) -> Self {
        match plan {
            "pro" => PlanTier::Pro,
            "enterprise" => PlanTier::Enterprise,
            _ => PlanTier::Free,
        }
    }

    pub fn is_pro(self) -> bool {
        matches!(self, PlanTier::Pro | PlanTier::Enterprise)
    }
}

/// Record types a tier may request.
pub fn allowed_record_types(tier: PlanTier) -> &'static [RecordType] {
    if tier.is_pro() {
        &RecordType::ALL
    } else {
        &[RecordType::A, RecordType::Cname]
    }
}

pub fn record_type_allowed(tier: PlanTier, record_type: RecordType) -> bool {
    allowed_record_types(tier).contains(&record_type)
}

/// Free accounts are pinned to a 3600s TTL; paid tiers may use the full
/// 60..=86400 range.
pub fn ttl_allowed(tier: PlanTier, ttl: i64) -> bool {
    if tier.is_pro() {
        (60..=86400).contains(&ttl)
    } else {
        ttl == 3600
    }
}

/// Look up a user's tier; a missing subscription row means free.
pub async fn tier_for_user(db: &DbConn, user_id: i64) -> Result<PlanTier> {
    let sub = Subscription::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    Ok(sub
        .map(|s| PlanTier::from_plan(&s.plan))
        .unwrap_or(PlanTier::Free))
}
