//! Per-token send outcomes reported by the push service.
//!
//! Delivery failures are response data, not errors: a multicast completes
//! normally even when every token fails, and the caller inspects the
//! per-token results afterwards.

use serde_json::Value;
use thiserror::Error;

/// Aggregate result of one multicast: per-token outcomes in token order.
#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<SendResponse>,
}

impl BatchResponse {
    pub fn from_responses(responses: Vec<SendResponse>) -> Self {
        let success_count = responses.iter().filter(|r| r.error.is_none()).count();
        Self {
            success_count,
            failure_count: responses.len() - success_count,
            responses,
        }
    }
}

/// Outcome of delivering to one device token.
#[derive(Debug, Clone)]
pub struct SendResponse {
    /// Message name assigned by the push service on success
    pub message_id: Option<String>,
    pub error: Option<SendError>,
}

impl SendResponse {
    pub fn success(message_id: String) -> Self {
        Self {
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failure(error: SendError) -> Self {
        Self {
            message_id: None,
            error: Some(error),
        }
    }
}

/// A per-token delivery error with its canonical messaging code.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct SendError {
    pub kind: SendErrorKind,
    pub message: String,
}

impl SendError {
    /// True when the token itself is the problem — structurally invalid or no
    /// longer registered — and re-sending to it can never succeed.
    pub fn is_token_stale(&self) -> bool {
        matches!(
            self.kind,
            SendErrorKind::InvalidToken | SendErrorKind::Unregistered
        )
    }
}

/// Classified per-token error causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendErrorKind {
    /// The token is not a valid registration token
    InvalidToken,
    /// The token was valid once but the device has unregistered
    Unregistered,
    /// The push service is temporarily unavailable
    Unavailable,
    /// Push-service-side internal error
    Internal,
    Other,
}

impl SendErrorKind {
    /// Canonical `messaging/*` code string.
    pub fn code(&self) -> &'static str {
        match self {
            SendErrorKind::InvalidToken => "messaging/invalid-registration-token",
            SendErrorKind::Unregistered => "messaging/registration-token-not-registered",
            SendErrorKind::Unavailable => "messaging/server-unavailable",
            SendErrorKind::Internal => "messaging/internal-error",
            SendErrorKind::Other => "messaging/unknown-error",
        }
    }
}

impl std::fmt::Display for SendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Map a v1 error response body to a `SendError`.
///
/// The FCM-specific `errorCode` inside `error.details` is authoritative when
/// present; otherwise the gRPC-style `error.status` decides.
pub fn parse_send_error(body: &Value) -> SendError {
    let error = &body["error"];
    let message = error["message"]
        .as_str()
        .unwrap_or("push service returned an error")
        .to_string();

    let fcm_code = error["details"]
        .as_array()
        .and_then(|details| {
            details.iter().find(|d| {
                d["@type"]
                    .as_str()
                    .is_some_and(|t| t.ends_with("FcmError"))
            })
        })
        .and_then(|d| d["errorCode"].as_str());

    let kind = match fcm_code {
        Some("UNREGISTERED") => SendErrorKind::Unregistered,
        Some("INVALID_ARGUMENT") => SendErrorKind::InvalidToken,
        Some("UNAVAILABLE") => SendErrorKind::Unavailable,
        Some("INTERNAL") => SendErrorKind::Internal,
        Some(_) => SendErrorKind::Other,
        None => match error["status"].as_str() {
            // v1 answers NOT_FOUND for tokens the service no longer knows
            Some("NOT_FOUND") | Some("UNREGISTERED") => SendErrorKind::Unregistered,
            Some("INVALID_ARGUMENT") => SendErrorKind::InvalidToken,
            Some("UNAVAILABLE") => SendErrorKind::Unavailable,
            Some("INTERNAL") => SendErrorKind::Internal,
            _ => SendErrorKind::Other,
        },
    };

    SendError { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unregistered_token_from_details() {
        let body = json!({
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND",
                "details": [{
                    "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                    "errorCode": "UNREGISTERED"
                }]
            }
        });

        let error = parse_send_error(&body);
        assert_eq!(error.kind, SendErrorKind::Unregistered);
        assert!(error.is_token_stale());
        assert_eq!(error.kind.code(), "messaging/registration-token-not-registered");
    }

    #[test]
    fn test_invalid_token_from_details() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "The registration token is not a valid FCM registration token",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                    "errorCode": "INVALID_ARGUMENT"
                }]
            }
        });

        let error = parse_send_error(&body);
        assert_eq!(error.kind, SendErrorKind::InvalidToken);
        assert!(error.is_token_stale());
        assert_eq!(error.kind.code(), "messaging/invalid-registration-token");
    }

    #[test]
    fn test_status_fallback_without_details() {
        let body = json!({
            "error": {
                "code": 503,
                "message": "Service Unavailable",
                "status": "UNAVAILABLE"
            }
        });

        let error = parse_send_error(&body);
        assert_eq!(error.kind, SendErrorKind::Unavailable);
        assert!(!error.is_token_stale());
    }

    #[test]
    fn test_unknown_error_shape() {
        let error = parse_send_error(&json!({}));
        assert_eq!(error.kind, SendErrorKind::Other);
        assert!(!error.is_token_stale());
    }

    #[test]
    fn test_batch_counts() {
        let batch = BatchResponse::from_responses(vec![
            SendResponse::success("projects/keeen/messages/1".to_string()),
            SendResponse::failure(SendError {
                kind: SendErrorKind::Unregistered,
                message: "gone".to_string(),
            }),
            SendResponse::success("projects/keeen/messages/2".to_string()),
        ]);

        assert_eq!(batch.success_count, 2);
        assert_eq!(batch.failure_count, 1);
        assert_eq!(batch.responses.len(), 3);
    }
}
