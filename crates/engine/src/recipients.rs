//! Recipient resolution — group membership down to a deduplicated token set.
//!
//! The per-user lookups are the only concurrent step in the pipeline: all of
//! them are issued together and joined once. A failed or empty lookup
//! contributes zero tokens; it never aborts the run.

use std::collections::HashSet;

use futures_util::future::join_all;

use keen_common::error::AppError;
use keen_store::DocumentStore;

/// Fetch the group's member list. `Ok(None)` when the group document is absent.
pub async fn member_uids<S: DocumentStore>(
    store: &S,
    group_id: &str,
) -> Result<Option<Vec<String>>, AppError> {
    Ok(store.get_group(group_id).await?.map(|group| group.member_uids))
}

/// Members minus the activator.
pub fn candidate_recipients(member_uids: Vec<String>, activator_id: &str) -> Vec<String> {
    member_uids
        .into_iter()
        .filter(|uid| uid != activator_id)
        .collect()
}

/// Resolve every candidate's push tokens concurrently and merge them into a
/// deduplicated list with empty strings dropped, first-seen order preserved.
pub async fn collect_tokens<S: DocumentStore>(store: &S, recipient_uids: &[String]) -> Vec<String> {
    let lookups = recipient_uids.iter().map(|uid| user_tokens(store, uid));
    let token_lists = join_all(lookups).await;
    dedupe_tokens(token_lists.into_iter().flatten())
}

/// One user's tokens; every miss resolves to an empty list.
async fn user_tokens<S: DocumentStore>(store: &S, user_id: &str) -> Vec<String> {
    match store.get_user(user_id).await {
        Ok(Some(user)) if !user.fcm_tokens.is_empty() => user.fcm_tokens,
        Ok(Some(_)) => {
            tracing::debug!(user_id, "User has no push tokens");
            Vec::new()
        }
        Ok(None) => {
            tracing::debug!(user_id, "User document not found");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Failed to fetch user document");
            Vec::new()
        }
    }
}

fn dedupe_tokens(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .filter(|token| !token.is_empty() && seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_activator_filtered_out() {
        let candidates = candidate_recipients(strings(&["A", "B", "C"]), "A");
        assert_eq!(candidates, strings(&["B", "C"]));
    }

    #[test]
    fn test_activator_only_group_leaves_no_candidates() {
        assert!(candidate_recipients(strings(&["A"]), "A").is_empty());
    }

    #[test]
    fn test_activator_absent_from_members() {
        let candidates = candidate_recipients(strings(&["B", "C"]), "A");
        assert_eq!(candidates, strings(&["B", "C"]));
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let deduped = dedupe_tokens(strings(&["t1", "t2", "t1", "t3", "t2"]).into_iter());
        assert_eq!(deduped, strings(&["t1", "t2", "t3"]));
    }

    #[test]
    fn test_dedupe_drops_empty_strings() {
        let deduped = dedupe_tokens(strings(&["", "t1", ""]).into_iter());
        assert_eq!(deduped, strings(&["t1"]));
    }
}
