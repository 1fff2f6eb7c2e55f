//! fitcoach - A lightweight fitness coaching backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitcoach::{
    api::{self, AppState},
    config::Config,
    services::{
        consultation::ConsultationService, progress::ProgressService, user::UserService,
    },
    store::{MemorySessionRepository, MemoryStore},
};

/// How often the background task prunes expired sessions
const SESSION_PRUNE_INTERVAL: tokio::time::Duration =
    tokio::time::Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitcoach=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fitcoach backend...");

    // Load configuration
    let config = Arc::new(Config::load_with_env(Path::new("config.yml"))?);
    tracing::info!("Configuration loaded");

    // Create stores
    let store = Arc::new(MemoryStore::new());
    let session_repo = Arc::new(MemorySessionRepository::new());

    // Initialize services
    let user_service = Arc::new(UserService::with_session_expiration(
        store.clone(),
        session_repo.clone(),
        config.session.expiration_days,
    ));
    let consultation_service = Arc::new(ConsultationService::new(store.clone()));
    let progress_service = Arc::new(ProgressService::new(store.clone()));

    // Build application state
    let state = AppState {
        user_service: user_service.clone(),
        consultation_service,
        progress_service,
        config: config.clone(),
    };

    // Start session pruning task (runs every 24 hours)
    {
        let user_service = user_service.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_PRUNE_INTERVAL);
            // A tokio interval's first tick completes immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                match user_service.cleanup_expired_sessions().await {
                    Ok(count) if count > 0 => {
                        tracing::info!(count, "pruned expired sessions");
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "session pruning failed"),
                }
            }
        });
    }

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
