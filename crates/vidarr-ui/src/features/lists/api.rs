//! List feature API calls.

use crate::features::lists::state::ListPayload;
use crate::services::api::ApiClient;
use crate::services::error::ApiError;
use serde::Serialize;
use vidarr_api_models::{CustomList, MediaType};

/// Fetch-cache key for the viewer's lists.
pub(crate) const LISTS_KEY: &str = "/api/v1/lists";
/// Fetch-cache key for the social feed, invalidated by list writes.
pub(crate) const SOCIAL_FEED_KEY: &str = "/api/v1/social/feed";

/// Fetch-cache key for the add-to-list payload of one item.
pub(crate) fn lists_for_item_key(media_type: MediaType, tmdb_id: i64) -> String {
    let kind = match media_type {
        MediaType::Movie => "movie",
        MediaType::Tv => "tv",
    };
    format!("/api/v1/lists/for-item/{kind}/{tmdb_id}")
}

pub(crate) async fn create_list(
    client: &ApiClient,
    payload: &ListPayload,
) -> Result<CustomList, ApiError> {
    client.post_json(LISTS_KEY, payload).await
}

pub(crate) async fn update_list(
    client: &ApiClient,
    id: i64,
    payload: &ListPayload,
) -> Result<CustomList, ApiError> {
    client.put_json(&format!("{LISTS_KEY}/{id}"), payload).await
}

pub(crate) async fn delete_list(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("{LISTS_KEY}/{id}")).await
}

pub(crate) async fn add_item(
    client: &ApiClient,
    list_id: i64,
    media_type: MediaType,
    tmdb_id: i64,
) -> Result<(), ApiError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Body {
        tmdb_id: i64,
        media_type: MediaType,
    }
    client
        .post_json::<_, serde_json::Value>(
            &format!("{LISTS_KEY}/{list_id}/items"),
            &Body { tmdb_id, media_type },
        )
        .await
        .map(|_| ())
}
