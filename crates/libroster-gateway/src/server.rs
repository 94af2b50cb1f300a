//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use libroster_core::RosterConfig;
use libroster_notify::{Notifier, NullNotifier, SmtpNotifier};
use libroster_store::{MemoryStore, RosterService, RosterStore, SheetsStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// Roster service — lifecycle rules over the injected record store.
    pub service: Arc<RosterService>,
    /// Digest/invite delivery.
    pub notifier: Arc<dyn Notifier>,
    /// Bearer secret for the external weekly-digest cron. None disables the
    /// endpoint.
    pub cron_secret: Option<String>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(shared: Arc<AppState>) -> Router {
    Router::new()
        // Public liveness
        .route("/health", get(super::routes::health_check))
        // Authenticated API
        .route("/api/v1/profile", get(super::routes::profile))
        .route(
            "/api/v1/volunteers",
            get(super::routes::list_volunteers)
                .post(super::routes::add_volunteer)
                .put(super::routes::update_volunteer)
                .delete(super::routes::delete_volunteer),
        )
        .route(
            "/api/v1/shifts",
            get(super::routes::list_shifts).post(super::routes::shift_action),
        )
        // Digest triggers
        .route(
            "/api/v1/notifications/weekly",
            post(super::routes::notifications_weekly),
        )
        .route(
            "/api/v1/notifications/monthly",
            post(super::routes::notifications_monthly),
        )
        .route(
            "/api/v1/notifications/invite",
            post(super::routes::notifications_invite),
        )
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Restrict CORS origins in production via env var
            // Example: LIBROSTER_CORS_ORIGINS=https://roster.library.org
            if let Ok(origins_str) = std::env::var("LIBROSTER_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                // Development fallback — allow all origins
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &RosterConfig) -> anyhow::Result<()> {
    let store: Arc<dyn RosterStore> = if config.sheets.is_configured() {
        tracing::info!(
            "🗂️ Using Google Sheets backend (spreadsheet {})",
            config.sheets.spreadsheet_id
        );
        Arc::new(SheetsStore::new(&config.sheets))
    } else {
        tracing::warn!("⚠️ Sheets credentials not configured — using in-memory store (development mode)");
        Arc::new(MemoryStore::new())
    };

    let notifier: Arc<dyn Notifier> = if config.smtp.enabled {
        tracing::info!("📧 SMTP notifier enabled: {}", config.smtp.host);
        Arc::new(SmtpNotifier::new(config.smtp.clone()))
    } else {
        tracing::warn!("📭 SMTP disabled — digests will be logged, not delivered");
        Arc::new(NullNotifier)
    };

    let cron_secret = if config.gateway.cron_secret.is_empty() {
        tracing::warn!("⚠️ No cron secret configured — weekly digest endpoint disabled");
        None
    } else {
        Some(config.gateway.cron_secret.clone())
    };

    let state = Arc::new(AppState {
        service: Arc::new(RosterService::new(store)),
        notifier,
        cron_secret,
        start_time: std::time::Instant::now(),
    });
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
