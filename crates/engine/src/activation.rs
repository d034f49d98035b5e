//! Trigger-event extraction and validation.
//!
//! Turns the opaque "document created" event into a fully-defaulted
//! [`Activation`], or a reason not to run. No lookups happen here.

use keen_common::types::TriggerEvent;

pub const DEFAULT_ACTIVATOR_NAME: &str = "Someone";
pub const DEFAULT_ACTIVITY_NAME: &str = "an activity";
pub const DEFAULT_TIME_DESCRIPTION: &str = "soon";

/// Why extraction declined to produce an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The event carried no snapshot, or an empty one — a valid no-op
    NoPayload,
    /// The record lacks an activator id or a group id
    MissingFields,
}

/// Path segments of a created activation document.
///
/// Pattern: `groups/{groupId}/activities/{activityId}/activations/{activationId}`,
/// optionally prefixed with the database resource path the event source
/// prepends (`projects/{p}/databases/{d}/documents/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    pub group_id: String,
    pub activity_id: String,
    pub activation_id: String,
}

impl DocumentPath {
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if segments.first() == Some(&"projects") && segments.len() > 5 {
            // projects/{p}/databases/{d}/documents/...
            segments.drain(..5);
        }

        match segments.as_slice() {
            ["groups", group_id, "activities", activity_id, "activations", activation_id] => {
                Some(Self {
                    group_id: (*group_id).to_string(),
                    activity_id: (*activity_id).to_string(),
                    activation_id: (*activation_id).to_string(),
                })
            }
            _ => None,
        }
    }
}

/// A validated activation, every field populated.
#[derive(Debug, Clone)]
pub struct Activation {
    pub activator_id: String,
    pub activator_name: String,
    pub activity_name: String,
    pub time_description: String,
    /// Taken from the record body, which is also what the lookups key off
    pub group_id: String,
    /// Taken from the trigger path, not the record body; empty when the path
    /// does not follow the activation pattern
    pub activity_id: String,
}

impl Activation {
    /// Extract an activation from a trigger event.
    ///
    /// Required: activator id and group id, both non-empty. Everything else
    /// defaults; names the client explicitly wrote as empty strings pass
    /// through untouched.
    pub fn from_event(event: &TriggerEvent) -> Result<Self, ExtractError> {
        let record = match &event.data {
            Some(record) if !record.is_empty() => record,
            _ => return Err(ExtractError::NoPayload),
        };

        let activator_id = match record.user_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ExtractError::MissingFields),
        };
        let group_id = match record.group_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ExtractError::MissingFields),
        };

        let activity_id = DocumentPath::parse(&event.document)
            .map(|path| path.activity_id)
            .unwrap_or_default();

        Ok(Self {
            activator_id,
            activator_name: record
                .user_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ACTIVATOR_NAME.to_string()),
            activity_name: record
                .activity_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.to_string()),
            time_description: record
                .time_description
                .clone()
                .unwrap_or_else(|| DEFAULT_TIME_DESCRIPTION.to_string()),
            group_id,
            activity_id,
        })
    }
}
