//! Migration: Create subdomain_requests table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubdomainRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubdomainRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::Subdomain)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::RecordType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::TargetValue)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubdomainRequests::Ttl).big_integer().not_null())
                    .col(
                        ColumnDef::new(SubdomainRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(SubdomainRequests::Reason).text().null())
                    .col(
                        ColumnDef::new(SubdomainRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubdomainRequests::ApprovedBy)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubdomainRequests::Table, SubdomainRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subdomain_requests_user")
                    .table(SubdomainRequests::Table)
                    .col(SubdomainRequests::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Names are unique among non-rejected requests; rejected requests
        // keep their history but free the label. This index is the
        // authoritative conflict signal for concurrent creates. sea-query
        // cannot express a partial index, hence raw SQL (valid on SQLite and
        // Postgres alike).
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_subdomain_requests_active_subdomain \
                 ON subdomain_requests (subdomain) WHERE status <> 'rejected'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SubdomainRequests::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "subdomain_requests"]
enum SubdomainRequests {
    Table,
    Id,
    #[iden = "user_id"]
    UserId,
    Subdomain,
    #[iden = "record_type"]
    RecordType,
    #[iden = "target_value"]
    TargetValue,
    Ttl,
    Status,
    Reason,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "approved_at"]
    ApprovedAt,
    #[iden = "approved_by"]
    ApprovedBy,
}

#[derive(Iden)]
#[iden = "users"]
enum Users {
    Table,
    Id,
}
