pub use sea_orm_migration::prelude::*;

mod m20260610_000001_create_users;
mod m20260610_000002_create_user_roles;
mod m20260610_000003_create_subscriptions;
mod m20260610_000004_create_subdomain_requests;
mod m20260610_000005_create_dns_records;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260610_000001_create_users::Migration),
            Box::new(m20260610_000002_create_user_roles::Migration),
            Box::new(m20260610_000003_create_subscriptions::Migration),
            Box::new(m20260610_000004_create_subdomain_requests::Migration),
            Box::new(m20260610_000005_create_dns_records::Migration),
        ]
    }
}
