//! Social feature API calls.

use crate::features::social::logic::FriendAction;
use crate::services::api::ApiClient;
use crate::services::error::ApiError;

/// Fetch-cache key for a user's profile.
pub(crate) fn profile_key(username: &str) -> String {
    format!("/api/v1/users/{}/profile", urlencoding::encode(username))
}

/// Fire a friend-graph action. The caller re-fetches the profile afterwards
/// instead of patching friend status locally.
pub(crate) async fn perform_action(
    client: &ApiClient,
    action: FriendAction,
    username: &str,
) -> Result<(), ApiError> {
    let path = action.path(username);
    if action.is_delete() {
        client.delete(&path).await
    } else {
        client.post_empty(&path).await
    }
}
