use serde::{Deserialize, Serialize};

/// Trigger event delivered when an activation document is created.
///
/// `document` is the created document's path under the database root,
/// following the pattern `groups/{groupId}/activities/{activityId}/activations/{activationId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub document: String,
    /// Record fields of the created document. `None` when the event carried
    /// no snapshot.
    #[serde(default)]
    pub data: Option<ActivationRecord>,
}

/// Raw fields of an activation document, exactly as written by the client app.
///
/// Everything is optional at this layer; required-field validation and
/// defaulting happen in the pipeline, not during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    /// User who triggered the activation
    #[serde(default)]
    pub user_id: Option<String>,
    /// Display name of that user
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub activity_name: Option<String>,
    /// Human-readable start time ("in 10 min", "at 6pm")
    #[serde(default)]
    pub time_description: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
}

impl ActivationRecord {
    /// True when the record carries no fields at all — an empty snapshot is a
    /// valid no-op, not a validation failure.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.user_name.is_none()
            && self.activity_name.is_none()
            && self.time_description.is_none()
            && self.group_id.is_none()
    }
}

/// A group document. Membership order carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(default)]
    pub member_uids: Vec<String>,
}

/// A user document, reduced to the fields this pipeline reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Registered device push tokens; may contain duplicates or empty strings,
    /// both filtered out during recipient resolution
    #[serde(default)]
    pub fcm_tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_record_deserializes_camel_case() {
        let record: ActivationRecord = serde_json::from_value(serde_json::json!({
            "userId": "A",
            "userName": "Alice",
            "activityName": "Run",
            "timeDescription": "in 10 min",
            "groupId": "G1"
        }))
        .unwrap();
        assert_eq!(record.user_id.as_deref(), Some("A"));
        assert_eq!(record.group_id.as_deref(), Some("G1"));
        assert!(!record.is_empty());
    }

    #[test]
    fn test_empty_activation_record() {
        let record: ActivationRecord = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_group_record_missing_members_defaults_empty() {
        let group: GroupRecord = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(group.member_uids.is_empty());
    }

    #[test]
    fn test_user_record_tokens() {
        let user: UserRecord = serde_json::from_value(serde_json::json!({
            "fcmTokens": ["t1", "t2"]
        }))
        .unwrap();
        assert_eq!(user.fcm_tokens, vec!["t1", "t2"]);
    }

    #[test]
    fn test_trigger_event_without_data() {
        let event: TriggerEvent = serde_json::from_value(serde_json::json!({
            "document": "groups/G1/activities/ACT/activations/X"
        }))
        .unwrap();
        assert!(event.data.is_none());
    }
}
