use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Provider-side record created at approval. The record fields are an
/// immutable snapshot of the request at approval time, not a live reference.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dns_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub request_id: Uuid,
    pub fqdn: String,
    pub record_type: String,
    pub target_value: String,
    pub ttl: i64,
    /// Cloudflare's identifier for the record; required for later deletion.
    pub provider_record_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subdomain_request::Entity",
        from = "Column::RequestId",
        to = "super::subdomain_request::Column::Id"
    )]
    SubdomainRequest,
}

impl Related<super::subdomain_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubdomainRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
