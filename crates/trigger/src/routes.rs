//! Trigger and health routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use keen_common::types::TriggerEvent;
use keen_notifier::PushClient;
use keen_store::DocumentStore;

use crate::state::AppState;

/// Build the router: event delivery on `/`, liveness on `/healthz`.
pub fn create_router<S, P>(state: AppState<S, P>) -> Router
where
    S: DocumentStore + 'static,
    P: PushClient + 'static,
{
    Router::new()
        .route("/", post(handle_activation::<S, P>))
        .route("/healthz", get(health_check))
        .with_state(state)
}

/// POST / — one pipeline run per delivered event.
///
/// Always 200: the event source must never retry on pipeline-level stops, and
/// no error is ever surfaced to end users. The outcome label in the body is
/// for observability only.
async fn handle_activation<S, P>(
    State(state): State<AppState<S, P>>,
    Json(event): Json<TriggerEvent>,
) -> Json<serde_json::Value>
where
    S: DocumentStore,
    P: PushClient,
{
    let outcome = keen_engine::handle(state.store.as_ref(), state.push.as_ref(), &event).await;
    Json(json!({ "outcome": outcome.label() }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "keen-trigger",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
