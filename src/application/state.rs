use sea_orm::DatabaseConnection;

use crate::services::provider::DynDnsProvider;
use crate::services::reconcile::Reconciler;

/// Database connection type alias
pub type DbConn = DatabaseConnection;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    /// DNS provider client, constructed once at startup and injected here —
    /// never reached through ambient/global lookup.
    pub dns: DynDnsProvider,
    pub reconciler: Reconciler,
    /// Parent domain all subdomains are issued under.
    pub base_domain: String,
}

impl AppState {
    pub fn new(db: DbConn, dns: DynDnsProvider, reconciler: Reconciler, base_domain: String) -> Self {
        Self {
            db,
            dns,
            reconciler,
            base_domain,
        }
    }
}
