//! Pipeline orchestration: one trigger event, one stateless run.

use keen_common::types::TriggerEvent;
use keen_notifier::PushClient;
use keen_store::DocumentStore;

use crate::activation::{Activation, ExtractError};
use crate::{dispatch, recipients};

/// Terminal state of one pipeline run. Every premature stop is a valid end
/// state, not an error to surface; nothing loops back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Event carried no (or an empty) snapshot
    NoPayload,
    /// Record lacked an activator id or group id
    MissingFields,
    /// Group document absent, or its fetch failed
    GroupNotFound,
    /// Every member is the activator
    NoRecipients,
    /// Recipients exist but none has a valid token
    NoTokens,
    /// Multicast attempted; per-token results logged
    Dispatched {
        success_count: usize,
        failure_count: usize,
    },
    /// The multicast itself could not be attempted
    DispatchFailed,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NoPayload => "no_payload",
            Outcome::MissingFields => "missing_fields",
            Outcome::GroupNotFound => "group_not_found",
            Outcome::NoRecipients => "no_recipients",
            Outcome::NoTokens => "no_tokens",
            Outcome::Dispatched { .. } => "dispatched",
            Outcome::DispatchFailed => "dispatch_failed",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Run the full pipeline for one activation event.
///
/// Never returns an error: every failure mode is logged and folded into an
/// [`Outcome`], and the collaborating platform only ever observes a clean
/// completion.
pub async fn handle<S, P>(store: &S, push: &P, event: &TriggerEvent) -> Outcome
where
    S: DocumentStore,
    P: PushClient,
{
    let activation = match Activation::from_event(event) {
        Ok(activation) => activation,
        Err(ExtractError::NoPayload) => {
            tracing::info!("Activation event carried no payload");
            return Outcome::NoPayload;
        }
        Err(ExtractError::MissingFields) => {
            tracing::error!(
                document = %event.document,
                "Activation record is missing activator id or group id"
            );
            return Outcome::MissingFields;
        }
    };

    tracing::info!(
        activator_id = %activation.activator_id,
        activator = %activation.activator_name,
        activity = %activation.activity_name,
        time = %activation.time_description,
        group_id = %activation.group_id,
        "Processing activation"
    );

    let members = match recipients::member_uids(store, &activation.group_id).await {
        Ok(Some(members)) => members,
        Ok(None) => {
            tracing::error!(group_id = %activation.group_id, "Group document not found");
            return Outcome::GroupNotFound;
        }
        Err(e) => {
            tracing::error!(group_id = %activation.group_id, error = %e, "Failed to fetch group document");
            return Outcome::GroupNotFound;
        }
    };

    let candidates = recipients::candidate_recipients(members, &activation.activator_id);
    if candidates.is_empty() {
        tracing::info!(group_id = %activation.group_id, "No other members to notify");
        return Outcome::NoRecipients;
    }
    tracing::info!(
        group_id = %activation.group_id,
        candidates = candidates.len(),
        "Resolved candidate recipients"
    );

    let tokens = recipients::collect_tokens(store, &candidates).await;
    if tokens.is_empty() {
        tracing::info!(group_id = %activation.group_id, "No valid push tokens among recipients");
        return Outcome::NoTokens;
    }
    tracing::info!(
        group_id = %activation.group_id,
        tokens = tokens.len(),
        "Collected unique push tokens"
    );

    let message = dispatch::build_message(&activation, tokens);
    dispatch::dispatch(push, message).await
}
