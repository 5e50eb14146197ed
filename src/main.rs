use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subdesk::config::CONFIG;
use subdesk::services::cloudflare::CloudflareProvider;
use subdesk::services::reconcile::Reconciler;
use subdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("subdesk={},tower_http=info", CONFIG.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting subdesk backend v{}", CONFIG.version);

    if CONFIG.dns.api_token.is_empty() || CONFIG.dns.zone_id.is_empty() {
        tracing::warn!(
            "Cloudflare credentials are not configured; provisioning calls will fail"
        );
    }

    // Database connection + migrations
    let db = subdesk::db::connect().await?;
    tracing::info!("Database connection established");

    // DNS provider client, constructed once and injected everywhere
    let dns = Arc::new(CloudflareProvider::new(&CONFIG.dns)?);
    let reconciler = Reconciler::spawn(dns.clone());

    let state = AppState::new(db, dns, reconciler, CONFIG.dns.base_domain.clone());

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port).parse()?;
    tracing::info!(
        "Listening on {} (base domain: {})",
        addr,
        CONFIG.dns.base_domain
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the main application router
fn create_app(state: AppState) -> Router {
    // CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    subdesk::endpoints::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
