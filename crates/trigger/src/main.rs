//! Keen activation trigger binary entrypoint.

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use keen_common::auth::TokenProvider;
use keen_common::config::AppConfig;
use keen_notifier::FcmClient;
use keen_store::FirestoreClient;

use keen_trigger::routes::create_router;
use keen_trigger::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keen_trigger=info,keen_engine=info")),
        )
        .json()
        .init();

    tracing::info!("Starting Keen activation trigger...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Explicit client handles, constructed once and shared by reference
    let tokens = TokenProvider::new(&config);
    let store = FirestoreClient::new(&config, tokens.clone());
    let push = FcmClient::new(&config, tokens);

    let state = AppState::new(store, push);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(project_id = %config.project_id, "Trigger listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = async { axum::serve(listener, app).await } => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Keen activation trigger stopped.");
    Ok(())
}
