//! Notification construction and multicast dispatch.

use std::collections::BTreeMap;

use keen_notifier::{MulticastMessage, Notification, PushClient};

use crate::activation::Activation;
use crate::handler::Outcome;

pub const APP_NAME: &str = "Keeen";

/// Marker the mobile app matches on to route notification taps.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Build the multicast for one activation.
pub fn build_message(activation: &Activation, tokens: Vec<String>) -> MulticastMessage {
    let notification = Notification {
        title: format!("{APP_NAME}: {}!", activation.activity_name),
        body: format!(
            "{} is starting \"{}\" {}! Are you keen?",
            activation.activator_name, activation.activity_name, activation.time_description
        ),
    };

    let mut data = BTreeMap::new();
    data.insert("groupId".to_string(), activation.group_id.clone());
    data.insert("activityId".to_string(), activation.activity_id.clone());
    data.insert("activityName".to_string(), activation.activity_name.clone());
    data.insert("activatedBy".to_string(), activation.activator_name.clone());
    data.insert(
        "timeDescription".to_string(),
        activation.time_description.clone(),
    );
    data.insert("click_action".to_string(), CLICK_ACTION.to_string());

    MulticastMessage::high_priority(tokens, notification, data)
}

/// Send the multicast and fold the per-token results into a terminal outcome.
///
/// Partial failure is a normal completion; only a multicast that could not be
/// attempted at all ends the run as `DispatchFailed`.
pub async fn dispatch<P: PushClient>(push: &P, message: MulticastMessage) -> Outcome {
    let token_count = message.tokens.len();

    let batch = match push.send_multicast(&message).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!(tokens = token_count, error = %e, "Multicast send failed");
            return Outcome::DispatchFailed;
        }
    };

    tracing::info!(
        success = batch.success_count,
        failure = batch.failure_count,
        "Multicast send finished"
    );

    if batch.failure_count > 0 {
        log_failures(&message.tokens, &batch);
    }

    Outcome::Dispatched {
        success_count: batch.success_count,
        failure_count: batch.failure_count,
    }
}

fn log_failures(tokens: &[String], batch: &keen_notifier::BatchResponse) {
    for (token, response) in tokens.iter().zip(&batch.responses) {
        let Some(error) = &response.error else {
            continue;
        };

        tracing::error!(token = %token, error = %error, "Failed to send to token");

        if error.is_token_stale() {
            // TODO: remove stale tokens from the owning user documents
            tracing::warn!(
                token = %token,
                code = %error.kind,
                "Token is invalid or unregistered; candidate for removal"
            );
        }
    }
}
