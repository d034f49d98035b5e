//! Document-store collaborator for the activation pipeline.
//!
//! `DocumentStore` is the read-only seam the pipeline consumes;
//! `FirestoreClient` is the production adapter over the Firestore REST API.

use async_trait::async_trait;

use keen_common::error::AppError;
use keen_common::types::{GroupRecord, UserRecord};

pub mod client;
pub mod value;

pub use client::FirestoreClient;

/// Read-only view of the document store.
///
/// The pipeline never writes; token cleanup after failed delivery would be the
/// first write path and is not implemented.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a group document by id. `Ok(None)` when the document is absent.
    async fn get_group(&self, group_id: &str) -> Result<Option<GroupRecord>, AppError>;

    /// Fetch a user document by id. `Ok(None)` when the document is absent.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;
}
