//! Push-delivery seam and the FCM HTTP v1 adapter.

use async_trait::async_trait;
use futures_util::future::join_all;

use keen_common::auth::TokenProvider;
use keen_common::config::AppConfig;
use keen_common::error::AppError;

use crate::message::MulticastMessage;
use crate::response::{BatchResponse, SendError, SendErrorKind, SendResponse, parse_send_error};

/// Multicast push delivery.
///
/// `Err` means the multicast itself could not be attempted; per-token
/// failures travel inside the `BatchResponse`.
#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send_multicast(&self, message: &MulticastMessage) -> Result<BatchResponse, AppError>;
}

/// FCM HTTP v1 adapter.
///
/// v1 has no batch endpoint, so a multicast is one `messages:send` POST per
/// token, issued concurrently and joined in token order — the same strategy
/// the platform SDKs use under their multicast APIs.
#[derive(Clone)]
pub struct FcmClient {
    http: reqwest::Client,
    host: String,
    project_id: String,
    tokens: TokenProvider,
}

impl FcmClient {
    pub fn new(config: &AppConfig, tokens: TokenProvider) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: config.fcm_host.clone(),
            project_id: config.project_id.clone(),
            tokens,
        }
    }

    fn send_url(&self) -> String {
        format!("{}/v1/projects/{}/messages:send", self.host, self.project_id)
    }

    /// Deliver to a single device token. Transport and API failures both
    /// resolve to a failed `SendResponse` — never an `Err` — so one bad token
    /// or dropped connection cannot sink the rest of the batch.
    async fn send_one(
        &self,
        bearer: &str,
        message: &MulticastMessage,
        device_token: &str,
    ) -> SendResponse {
        let request = self
            .http
            .post(self.send_url())
            .bearer_auth(bearer)
            .json(&message.to_send_body(device_token));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return SendResponse::failure(SendError {
                    kind: SendErrorKind::Unavailable,
                    message: e.to_string(),
                });
            }
        };

        if response.status().is_success() {
            let message_id = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body["name"].as_str().map(str::to_string))
                .unwrap_or_default();
            return SendResponse::success(message_id);
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        SendResponse::failure(parse_send_error(&body))
    }
}

#[async_trait]
impl PushClient for FcmClient {
    async fn send_multicast(&self, message: &MulticastMessage) -> Result<BatchResponse, AppError> {
        // Failing to mint a token fails the whole multicast; past this point
        // every failure is per-token
        let bearer = self.tokens.token().await?;

        let sends = message
            .tokens
            .iter()
            .map(|device_token| self.send_one(&bearer, message, device_token));
        let responses = join_all(sends).await;

        tracing::debug!(tokens = responses.len(), "Multicast fan-out complete");
        Ok(BatchResponse::from_responses(responses))
    }
}
