//! Request feature API calls.

use crate::services::api::ApiClient;
use crate::services::error::ApiError;
use vidarr_api_models::{
    BulkEpisodeRequest, BulkRequestResponse, Episode, QualityProfile, ReleaseCandidate, Season,
};

/// Fetch-cache key for the requests list.
pub(crate) const REQUESTS_KEY: &str = "/api/v1/requests";

pub(crate) async fn fetch_seasons(
    client: &ApiClient,
    tmdb_id: i64,
) -> Result<Vec<Season>, ApiError> {
    client.get_json(&format!("/api/v1/tv/{tmdb_id}/seasons")).await
}

pub(crate) async fn fetch_season_episodes(
    client: &ApiClient,
    tmdb_id: i64,
    season: u32,
) -> Result<Vec<Episode>, ApiError> {
    client
        .get_json(&format!("/api/v1/tv/{tmdb_id}/season/{season}"))
        .await
}

pub(crate) async fn submit_bulk_request(
    client: &ApiClient,
    body: &BulkEpisodeRequest,
) -> Result<BulkRequestResponse, ApiError> {
    client.post_json("/api/v1/requests/tv/bulk", body).await
}

pub(crate) async fn fetch_quality_profiles(
    client: &ApiClient,
) -> Result<Vec<QualityProfile>, ApiError> {
    client.get_json("/api/v1/settings/quality-profiles").await
}

/// Admin-only raw release search for a series.
pub(crate) async fn search_releases(
    client: &ApiClient,
    tmdb_id: i64,
    query: &str,
) -> Result<Vec<ReleaseCandidate>, ApiError> {
    client
        .get_json(&format!(
            "/api/v1/admin/releases?tmdbId={tmdb_id}&query={}",
            urlencoding::encode(query)
        ))
        .await
}
