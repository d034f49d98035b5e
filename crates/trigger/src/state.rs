//! Shared application state for the Axum trigger server.

use std::sync::Arc;

use keen_notifier::PushClient;
use keen_store::DocumentStore;

/// Client handles shared across requests, constructed once at process start.
///
/// Generic over the collaborator traits so tests can drive the router with
/// in-memory fakes.
pub struct AppState<S, P> {
    pub store: Arc<S>,
    pub push: Arc<P>,
}

impl<S: DocumentStore, P: PushClient> AppState<S, P> {
    pub fn new(store: S, push: P) -> Self {
        Self {
            store: Arc::new(store),
            push: Arc::new(push),
        }
    }
}

impl<S, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            push: Arc::clone(&self.push),
        }
    }
}
