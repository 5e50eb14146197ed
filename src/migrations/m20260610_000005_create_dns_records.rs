//! Migration: Create dns_records table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DnsRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DnsRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::RequestId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DnsRecords::Fqdn).string().not_null())
                    .col(ColumnDef::new(DnsRecords::RecordType).string().not_null())
                    .col(ColumnDef::new(DnsRecords::TargetValue).string().not_null())
                    .col(ColumnDef::new(DnsRecords::Ttl).big_integer().not_null())
                    .col(
                        ColumnDef::new(DnsRecords::ProviderRecordId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DnsRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DnsRecords::Table, DnsRecords::RequestId)
                            .to(SubdomainRequests::Table, SubdomainRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DnsRecords::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "dns_records"]
enum DnsRecords {
    Table,
    Id,
    #[iden = "request_id"]
    RequestId,
    Fqdn,
    #[iden = "record_type"]
    RecordType,
    #[iden = "target_value"]
    TargetValue,
    Ttl,
    #[iden = "provider_record_id"]
    ProviderRecordId,
    #[iden = "created_at"]
    CreatedAt,
}

#[derive(Iden)]
#[iden = "subdomain_requests"]
enum SubdomainRequests {
    Table,
    Id,
}
