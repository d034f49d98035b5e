//! GCP access-token provider shared by the Firestore and FCM adapters.
//!
//! Resolution order:
//!   1. `GOOGLE_ACCESS_TOKEN` env override (local development, emulators)
//!   2. GCE metadata server token endpoint, cached until shortly before expiry
//!
//! Constructed once at process start and cloned into every client, so there is
//! no hidden process-wide SDK state.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::error::AppError;

const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh this many seconds before the metadata server says the token expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Cached OAuth2 access token.
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

/// Response shape of the metadata server token endpoint.
#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: i64,
}

/// Mints bearer tokens for Google API calls.
#[derive(Clone)]
pub struct TokenProvider {
    client: reqwest::Client,
    metadata_host: String,
    static_token: Option<String>,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenProvider {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            metadata_host: config.metadata_host.clone(),
            static_token: config.google_access_token.clone(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Return a bearer token valid for at least `EXPIRY_MARGIN_SECS` seconds.
    pub async fn token(&self) -> Result<String, AppError> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }

        if let Some(cached) = self.cached.read().await.as_ref()
            && cached.is_fresh(Utc::now())
        {
            return Ok(cached.token.clone());
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }

    /// Fetch a new token from the metadata server.
    async fn fetch(&self) -> Result<CachedToken, AppError> {
        let url = format!("{}{}", self.metadata_host, METADATA_TOKEN_PATH);
        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Auth(format!("metadata server rejected token request: {e}")))?;

        let minted: MetadataToken = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("invalid metadata token response: {e}")))?;

        tracing::debug!(expires_in = minted.expires_in, "Minted access token");

        Ok(CachedToken {
            token: minted.access_token,
            expires_at: Utc::now() + Duration::seconds(minted.expires_in),
        })
    }
}
