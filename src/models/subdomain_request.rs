use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's request for a DNS record under the base domain.
///
/// Status: pending | approved | rejected. Both terminal states are reached
/// from pending exactly once; deletion removes the row (and any linked
/// `dns_records` row) from any state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subdomain_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: i64,
    pub subdomain: String,
    /// A | CNAME | TXT | SRV | MX
    pub record_type: String,
    pub target_value: String,
    pub ttl: i64,
    pub status: String,
    /// Set only on rejection.
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub approved_at: Option<DateTimeUtc>,
    pub approved_by: Option<i64>,
}

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_one = "super::dns_record::Entity")]
    DnsRecord,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::dns_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DnsRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
