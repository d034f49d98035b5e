//! Multicast message construction types.
//!
//! The shapes mirror the FCM HTTP v1 `Message` resource; `tokens` is the one
//! addition, since a multicast targets many devices with the same content.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

/// User-visible notification content.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Android delivery hints.
#[derive(Debug, Clone, Serialize)]
pub struct AndroidConfig {
    pub priority: AndroidPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AndroidPriority {
    Normal,
    High,
}

/// APNs delivery hints: headers plus the `aps` dictionary.
#[derive(Debug, Clone, Serialize)]
pub struct ApnsConfig {
    pub headers: BTreeMap<String, String>,
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aps {
    /// 1 requests background delivery even without user-visible content
    #[serde(rename = "content-available")]
    pub content_available: u8,
}

/// One notification addressed to many device tokens.
#[derive(Debug, Clone, Serialize)]
pub struct MulticastMessage {
    #[serde(skip)]
    pub tokens: Vec<String>,
    pub notification: Notification,
    /// Flat string map handed to the client app for tap routing
    pub data: BTreeMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

impl MulticastMessage {
    /// Build a multicast with the delivery hints this pipeline always uses:
    /// high priority on Android, background-capable high-priority on APNs.
    pub fn high_priority(
        tokens: Vec<String>,
        notification: Notification,
        data: BTreeMap<String, String>,
    ) -> Self {
        let mut headers = BTreeMap::new();
        // "10" is immediate delivery on Apple's scale
        headers.insert("apns-priority".to_string(), "10".to_string());

        Self {
            tokens,
            notification,
            data,
            android: AndroidConfig {
                priority: AndroidPriority::High,
            },
            apns: ApnsConfig {
                headers,
                payload: ApnsPayload {
                    aps: Aps {
                        content_available: 1,
                    },
                },
            },
        }
    }

    /// Request body of one v1 `messages:send` call for a single device token.
    pub(crate) fn to_send_body(&self, token: &str) -> serde_json::Value {
        json!({
            "message": {
                "token": token,
                "notification": &self.notification,
                "data": &self.data,
                "android": &self.android,
                "apns": &self.apns,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_message() -> MulticastMessage {
        let mut data = BTreeMap::new();
        data.insert("groupId".to_string(), "G1".to_string());
        MulticastMessage::high_priority(
            vec!["t1".to_string(), "t2".to_string()],
            Notification {
                title: "Keeen: Run!".to_string(),
                body: "Alice is starting \"Run\" in 10 min! Are you keen?".to_string(),
            },
            data,
        )
    }

    #[test]
    fn test_send_body_shape() {
        let body = make_message().to_send_body("t1");
        let message = &body["message"];

        assert_eq!(message["token"], "t1");
        assert_eq!(message["notification"]["title"], "Keeen: Run!");
        assert_eq!(message["data"]["groupId"], "G1");
        assert_eq!(message["android"]["priority"], "HIGH");
        assert_eq!(message["apns"]["headers"]["apns-priority"], "10");
        assert_eq!(message["apns"]["payload"]["aps"]["content-available"], 1);
    }

    #[test]
    fn test_tokens_not_serialized_into_body() {
        let body = make_message().to_send_body("t2");
        assert!(body["message"].get("tokens").is_none());
    }
}
