//! Test helpers and utilities for integration testing.
//!
//! Provides an in-memory database per test, user/role/plan fixtures, a mock
//! DNS provider with call counters, and request helpers driving the real
//! router.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tower::util::ServiceExt;
use uuid::Uuid;

use subdesk::error::{AppError, Result};
use subdesk::migrations::Migrator;
use subdesk::models::{dns_record, subdomain_request, subscription, user, user_role};
use subdesk::services::provider::{
    CreateRecordRequest, DnsProvider, DynDnsProvider, ProviderRecord,
};
use subdesk::services::reconcile::Reconciler;
use subdesk::services::security::create_access_token;
use subdesk::state::AppState;

/// Base domain used by all test apps.
pub const BASE_DOMAIN: &str = "example.test";

// ============================================================================
// Database fixtures
// ============================================================================

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Simple in-memory SQLite - each connection gets its own database
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Create a test user and return the user model
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
    full_name: Option<&str>,
) -> user::Model {
    let now = Utc::now();
    // Low bcrypt cost keeps the suite fast; verify reads the cost from the hash
    let hashed = bcrypt::hash("password123", 4).unwrap();

    let new_user = user::ActiveModel {
        email: Set(email.to_string()),
        full_name: Set(full_name.map(|s| s.to_string())),
        hashed_password: Set(hashed),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    new_user.insert(db).await.unwrap()
}

/// Grant the admin role to a user
pub async fn grant_admin(db: &DatabaseConnection, user_id: i64) {
    let role = user_role::ActiveModel {
        user_id: Set(user_id),
        role: Set("admin".to_string()),
    };
    role.insert(db).await.unwrap();
}

/// Set a user's subscription plan
pub async fn set_plan(db: &DatabaseConnection, user_id: i64, plan: &str) {
    let now = Utc::now();
    let sub = subscription::ActiveModel {
        user_id: Set(user_id),
        plan: Set(plan.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    sub.insert(db).await.unwrap();
}

/// Insert a subdomain request directly, bypassing the create pipeline
pub async fn insert_request(
    db: &DatabaseConnection,
    user_id: i64,
    subdomain: &str,
    record_type: &str,
    target_value: &str,
    status: &str,
) -> subdomain_request::Model {
    insert_request_at(
        db,
        user_id,
        subdomain,
        record_type,
        target_value,
        status,
        Utc::now(),
    )
    .await
}

/// Insert a subdomain request with an explicit creation time (for ordering
/// assertions)
pub async fn insert_request_at(
    db: &DatabaseConnection,
    user_id: i64,
    subdomain: &str,
    record_type: &str,
    target_value: &str,
    status: &str,
    created_at: chrono::DateTime<Utc>,
) -> subdomain_request::Model {
    let request = subdomain_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        subdomain: Set(subdomain.to_string()),
        record_type: Set(record_type.to_string()),
        target_value: Set(target_value.to_string()),
        ttl: Set(3600),
        status: Set(status.to_string()),
        reason: Set(None),
        created_at: Set(created_at),
        approved_at: Set(None),
        approved_by: Set(None),
    };
    request.insert(db).await.unwrap()
}

/// Insert a dns_records linkage row for an approved request
pub async fn insert_dns_record(
    db: &DatabaseConnection,
    request_id: Uuid,
    fqdn: &str,
    provider_record_id: &str,
) -> dns_record::Model {
    let record = dns_record::ActiveModel {
        request_id: Set(request_id),
        fqdn: Set(fqdn.to_string()),
        record_type: Set("A".to_string()),
        target_value: Set("1.2.3.4".to_string()),
        ttl: Set(3600),
        provider_record_id: Set(provider_record_id.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    record.insert(db).await.unwrap()
}

/// A timestamp `secs` seconds in the past
pub fn seconds_ago(secs: i64) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::seconds(secs)
}

// ============================================================================
// Mock DNS provider
// ============================================================================

/// In-memory stand-in for the Cloudflare client.
///
/// Counts every call so tests can assert which paths reached the provider,
/// and flips to failure modes on demand.
#[derive(Default)]
pub struct MockDnsProvider {
    pub find_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,

    pub fail_find: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,

    /// FQDNs the provider already has live records for.
    pub existing_fqdns: Mutex<Vec<String>>,
    /// FQDNs passed to find_records, in call order.
    pub queried_fqdns: Mutex<Vec<String>>,
    /// Record ids passed to delete_record, in call order.
    pub deleted_ids: Mutex<Vec<String>>,
    /// Forced id for the next created record (otherwise cf-1, cf-2, ...).
    pub next_record_id: Mutex<Option<String>>,

    id_counter: AtomicUsize,
}

impl MockDnsProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_existing(fqdns: &[&str]) -> Arc<Self> {
        let mock = Self::default();
        *mock.existing_fqdns.lock().unwrap() =
            fqdns.iter().map(|s| s.to_string()).collect();
        Arc::new(mock)
    }

    pub fn set_next_record_id(&self, id: &str) {
        *self.next_record_id.lock().unwrap() = Some(id.to_string());
    }

    pub fn find_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn find_records(&self, fqdn: &str) -> Result<Vec<ProviderRecord>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.queried_fqdns.lock().unwrap().push(fqdn.to_string());

        if self.fail_find.load(Ordering::SeqCst) {
            return Err(AppError::Upstream(
                "Cloudflare API error (list DNS records): simulated outage".to_string(),
            ));
        }

        let existing = self.existing_fqdns.lock().unwrap();
        if existing.iter().any(|f| f == fqdn) {
            Ok(vec![ProviderRecord {
                id: "existing-1".to_string(),
                name: fqdn.to_string(),
                record_type: "A".to_string(),
                content: "10.0.0.1".to_string(),
                ttl: 3600,
            }])
        } else {
            Ok(vec![])
        }
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ProviderRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::Upstream(
                "Cloudflare API error (create DNS record): simulated refusal".to_string(),
            ));
        }

        let id = self.next_record_id.lock().unwrap().take().unwrap_or_else(|| {
            format!("cf-{}", self.id_counter.fetch_add(1, Ordering::SeqCst) + 1)
        });

        Ok(ProviderRecord {
            id,
            name: req.fqdn.clone(),
            record_type: req.record_type.as_str().to_string(),
            content: req.content.clone(),
            ttl: req.ttl,
        })
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.deleted_ids.lock().unwrap().push(record_id.to_string());

        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::Upstream(
                "Cloudflare API error (delete DNS record): simulated network error".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// App + request helpers
// ============================================================================

/// Build the full router over a test database and mock provider
pub fn build_test_app(db: DatabaseConnection, dns: Arc<MockDnsProvider>) -> axum::Router {
    let provider: DynDnsProvider = dns;
    let reconciler = Reconciler::spawn(provider.clone());
    let state = AppState::new(db, provider, reconciler, BASE_DOMAIN.to_string());
    subdesk::endpoints::create_router(state)
}

/// Mint a bearer token for a user
pub fn bearer_token(user: &user::Model) -> String {
    create_access_token(user).unwrap()
}

/// Send a JSON request through the router; returns status and parsed body
pub async fn json_request(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}
