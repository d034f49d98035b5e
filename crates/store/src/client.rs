//! Firestore REST adapter.
//!
//! One GET per document: `{host}/v1/projects/{project}/databases/(default)/documents/{collection}/{id}`.
//! 404 maps to `Ok(None)`; every other non-success status is an error for the
//! caller to handle at the point of use.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use keen_common::auth::TokenProvider;
use keen_common::config::AppConfig;
use keen_common::error::AppError;
use keen_common::types::{GroupRecord, UserRecord};

use crate::DocumentStore;
use crate::value::decode_document;

const GROUPS_COLLECTION: &str = "groups";
const USERS_COLLECTION: &str = "users";

/// Firestore REST client. Cheap to clone; constructed once at process start.
#[derive(Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    host: String,
    project_id: String,
    tokens: TokenProvider,
}

impl FirestoreClient {
    pub fn new(config: &AppConfig, tokens: TokenProvider) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: config.firestore_host.clone(),
            project_id: config.project_id.clone(),
            tokens,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}/{}",
            self.host, self.project_id, collection, id
        )
    }

    /// Fetch one document and deserialize its decoded fields.
    async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let token = self.tokens.token().await?;
        let response = self
            .http
            .get(self.document_url(collection, id))
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: serde_json::Value = response.error_for_status()?.json().await?;
        let record = serde_json::from_value(decode_document(&document)).map_err(|e| {
            AppError::Decode(format!("invalid {collection} document {id}: {e}"))
        })?;

        tracing::debug!(collection, id, "Fetched document");
        Ok(Some(record))
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get_group(&self, group_id: &str) -> Result<Option<GroupRecord>, AppError> {
        self.get_document(GROUPS_COLLECTION, group_id).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        self.get_document(USERS_COLLECTION, user_id).await
    }
}
