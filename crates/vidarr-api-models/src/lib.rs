#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Vidarr portal API.
//!
//! These types record the `/api/v1` contract shape the UI depends on. The
//! portal's historical endpoints use camelCase field names, while the
//! season/episode and notification-endpoint payloads use snake_case; the
//! serde attributes below preserve that mixed contract deliberately rather
//! than normalising it client-side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media kind discriminator used across requests and library items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A feature film.
    Movie,
    /// A television series.
    Tv,
}

/// Numeric media availability constants as served by the API.
///
/// `LibraryItem::media_status` is compared against these values; the server
/// owns the enum and the client treats unknown values as [`UNKNOWN`].
pub mod media_status {
    /// Availability has not been computed.
    pub const UNKNOWN: i32 = 1;
    /// A request exists but nothing has been acquired.
    pub const PENDING: i32 = 2;
    /// The item is being processed after download.
    pub const PROCESSING: i32 = 3;
    /// Some but not all requested parts are available.
    pub const PARTIALLY_AVAILABLE: i32 = 4;
    /// The item is fully available in the library.
    pub const AVAILABLE: i32 = 5;
    /// The item is actively downloading.
    pub const DOWNLOADING: i32 = 6;
}

/// A user's ask for a specific title to be acquired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequest {
    /// Stable request identifier.
    pub id: i64,
    /// TMDB identifier of the requested title.
    pub tmdb_id: i64,
    /// Display title at request time.
    pub title: String,
    /// Movie or TV request.
    pub media_type: MediaType,
    /// Free-text status string; the UI buckets it into fixed classes.
    pub status: String,
    /// Username of the requesting user.
    pub requested_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A library entry surfaced on discovery/dashboard panels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    /// Stable library identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Poster image URL when one exists.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Availability constant; see [`media_status`].
    pub media_status: i32,
    /// Movie or TV item.
    pub media_type: MediaType,
}

/// A user-owned named collection of media items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomList {
    /// Stable list identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the list is publicly visible.
    pub is_public: bool,
    /// Opaque share token, always present.
    pub share_id: String,
    /// Human-readable share slug; preferred over `share_id` when present.
    #[serde(default)]
    pub share_slug: Option<String>,
    /// Poster URLs used to render the list cover collage.
    #[serde(default)]
    pub cover_items: Vec<String>,
    /// Number of items in the list.
    pub item_count: u32,
}

/// Lists payload for the add-to-list modal: the viewer's lists plus the
/// ids of those already containing the target item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsForItem {
    /// The viewer's lists.
    pub lists: Vec<CustomList>,
    /// Ids of lists that already contain the item.
    #[serde(default)]
    pub containing_list_ids: Vec<i64>,
}

/// Season summary for a series, before episodes are loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes the season carries.
    pub episode_count: u32,
}

/// Episode row within a season detail payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode number within its season.
    pub episode_number: u32,
    /// Episode title when known.
    #[serde(default)]
    pub name: Option<String>,
    /// Already available in the library.
    #[serde(default)]
    pub available: bool,
    /// Already covered by an open request.
    #[serde(default)]
    pub requested: bool,
    /// Currently downloading.
    #[serde(default)]
    pub downloading: bool,
}

/// Season/episode coordinate used in skip lists and 422 responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    /// Season number.
    pub season_number: u32,
    /// Episode number.
    pub episode_number: u32,
}

/// Per-season manifest entry for a bulk episode request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSelection {
    /// Season number the episodes belong to.
    pub season_number: u32,
    /// Checked episode numbers, ascending.
    pub episodes: Vec<u32>,
}

/// Policy controlling which future episodes are tracked after a bulk request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonitoringOption {
    /// Track every episode of the series.
    All,
    /// Track episodes that have not aired yet.
    Future,
    /// Track aired episodes that are missing.
    Missing,
    /// Track only what exists today.
    Existing,
    /// Track the pilot episode only.
    Pilot,
    /// Track the first season only.
    FirstSeason,
    /// Track the latest season only.
    LatestSeason,
    /// Track nothing automatically.
    #[default]
    None,
}

/// Body of the bulk episode request endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEpisodeRequest {
    /// TMDB identifier of the series.
    pub tmdb_id: i64,
    /// Per-season episode manifest.
    pub seasons: Vec<SeasonSelection>,
    /// Monitoring policy for future episodes.
    pub monitoring: MonitoringOption,
    /// Optional quality profile override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_profile_id: Option<i64>,
}

/// Success body of the bulk episode request endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequestResponse {
    /// Number of episodes newly requested.
    pub count: u32,
    /// Episodes skipped because they were already covered.
    #[serde(default)]
    pub skipped: Vec<EpisodeRef>,
}

/// A named download-quality preset selectable at request time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Stable profile identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Raw release candidate from the admin-only release search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCandidate {
    /// Indexer-scoped identifier for the release.
    pub guid: String,
    /// Release title as published by the indexer.
    pub title: String,
    /// Indexer name.
    pub indexer: String,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Seeder count when the indexer reports one.
    #[serde(default)]
    pub seeders: Option<u32>,
    /// Parsed quality label when available.
    #[serde(default)]
    pub quality: Option<String>,
}

/// Bidirectional relationship state between two users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    /// No relationship.
    None,
    /// Mutual friends.
    Friends,
    /// The viewer sent a request that is still pending.
    PendingSent,
    /// The profile owner sent the viewer a request.
    PendingReceived,
    /// One side blocked the other.
    Blocked,
}

/// Profile visibility levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    /// Visible to everyone.
    Public,
    /// Visible to friends only.
    Friends,
    /// Visible to the owner only.
    Private,
}

/// Another user's profile as seen by the current viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Avatar URL when set.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Profile visibility level.
    pub visibility: ProfileVisibility,
    /// Relationship between viewer and owner, computed server-side.
    pub friend_status: FriendshipStatus,
    /// Taste overlap with the viewer, when visible.
    #[serde(default)]
    pub taste_overlap: Option<TasteOverlap>,
    /// Total requests made by this user.
    #[serde(default)]
    pub request_count: u32,
}

/// Taste-overlap summary between viewer and profile owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasteOverlap {
    /// Overlap score in `0.0..=1.0`.
    pub score: f32,
    /// Titles both users rated highly.
    #[serde(default)]
    pub shared_favorites: Vec<String>,
}

/// One entry in the friends activity feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendActivity {
    /// Acting friend's username.
    pub username: String,
    /// Action verb (requested, watched, listed, ...).
    pub action: String,
    /// Title the action applies to.
    pub title: String,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

/// Authenticated portal user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    /// Stable user identifier.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email when shared.
    #[serde(default)]
    pub email: Option<String>,
    /// Permission bitmask; see [`permissions`].
    pub permissions: u64,
    /// Total requests made by this user.
    #[serde(default)]
    pub request_count: u32,
    /// Avatar URL when set.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Permission bits carried by [`PortalUser::permissions`].
pub mod permissions {
    /// Full administrative access.
    pub const ADMIN: u64 = 1 << 0;
    /// May approve/decline other users' requests.
    pub const MANAGE_REQUESTS: u64 = 1 << 1;
    /// May edit users and their permissions.
    pub const MANAGE_USERS: u64 = 1 << 2;
    /// Own requests are approved without review.
    pub const AUTO_APPROVE: u64 = 1 << 3;
    /// May use the raw release search.
    pub const VIEW_RELEASES: u64 = 1 << 4;

    /// Whether `mask` carries `bit` (admins implicitly carry everything).
    #[must_use]
    pub const fn has(mask: u64, bit: u64) -> bool {
        mask & ADMIN != 0 || mask & bit != 0
    }
}

/// Session bootstrap payload: current user plus the CSRF token mutating
/// calls must echo back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// The authenticated user.
    pub user: PortalUser,
    /// CSRF token for the `X-Csrf-Token` header.
    pub csrf_token: String,
}

/// Health snapshot for one backing service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Service name (jellyfin, sonarr, radarr, ...).
    pub name: String,
    /// Whether the last probe succeeded.
    pub ok: bool,
    /// Failure detail when the probe failed.
    #[serde(default)]
    pub message: Option<String>,
    /// Probe latency when measured.
    #[serde(default)]
    pub latency_ms: Option<u32>,
}

/// Personal watch statistics panel payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchStats {
    /// Total play count.
    pub total_plays: u32,
    /// Total minutes watched.
    pub total_minutes: u64,
    /// Most-watched genre when computed.
    #[serde(default)]
    pub top_genre: Option<String>,
}

/// Earned (or earnable) achievement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Stable achievement key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// How to earn it.
    pub description: String,
    /// When it was earned; `None` while still locked.
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

/// Upcoming episode for a followed series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEpisode {
    /// Series title.
    pub series_title: String,
    /// Season number.
    pub season_number: u32,
    /// Episode number.
    pub episode_number: u32,
    /// Air date.
    pub air_date: NaiveDate,
}

/// Personalized recommendation entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// TMDB identifier.
    pub tmdb_id: i64,
    /// Display title.
    pub title: String,
    /// Poster URL when one exists.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Movie or TV recommendation.
    pub media_type: MediaType,
    /// Relevance score in `0.0..=1.0`.
    pub score: f32,
}

/// Continue-watching panel entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingItem {
    /// Display title.
    pub title: String,
    /// Poster URL when one exists.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Playback progress in `0.0..=100.0`.
    pub progress_percent: f32,
    /// Minutes remaining.
    pub remaining_minutes: u32,
}

/// Server-side backup archive entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Archive name; unique on the server.
    pub name: String,
    /// Archive size in bytes.
    pub size_bytes: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Result of validating one backup archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupValidation {
    /// Whether the archive validated cleanly.
    pub valid: bool,
    /// Failure detail when invalid.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Configured notification endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationEndpoint {
    /// Stable endpoint identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Endpoint kind (discord, webhook, email, ...).
    pub kind: String,
    /// Whether the endpoint fires at all.
    pub enabled: bool,
    /// Global endpoints are managed by the server and cannot be deleted.
    pub is_global: bool,
    /// Bitmask of subscribed event types; see [`notification_types`].
    pub types: u64,
    /// Kind-specific configuration blob.
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Event-type bits carried by [`NotificationEndpoint::types`].
pub mod notification_types {
    /// A request was created.
    pub const REQUEST_CREATED: u64 = 1 << 0;
    /// A request was approved.
    pub const REQUEST_APPROVED: u64 = 1 << 1;
    /// A request was declined.
    pub const REQUEST_DECLINED: u64 = 1 << 2;
    /// Requested media became available.
    pub const MEDIA_AVAILABLE: u64 = 1 << 3;
    /// Acquisition of requested media failed.
    pub const MEDIA_FAILED: u64 = 1 << 4;

    /// All known bits with display labels, in editor order.
    pub const ALL: [(u64, &str); 5] = [
        (REQUEST_CREATED, "Request created"),
        (REQUEST_APPROVED, "Request approved"),
        (REQUEST_DECLINED, "Request declined"),
        (MEDIA_AVAILABLE, "Media available"),
        (MEDIA_FAILED, "Media failed"),
    ];
}

/// Jellyfin connection status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JellyfinStatus {
    /// Whether the server answered the last probe.
    pub connected: bool,
    /// Server display name when connected.
    #[serde(default)]
    pub server_name: Option<String>,
    /// Server version when connected.
    #[serde(default)]
    pub version: Option<String>,
}

/// One Jellyfin library eligible for syncing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JellyfinLibrary {
    /// Jellyfin library identifier.
    pub id: Uuid,
    /// Library display name.
    pub name: String,
    /// Whether the library is synced into the portal.
    pub enabled: bool,
    /// Items seen at the last scan.
    #[serde(default)]
    pub item_count: u32,
    /// Last completed scan, when any.
    #[serde(default)]
    pub last_scan: Option<DateTime<Utc>>,
}

/// Progress of a running library scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    /// Whether a scan is currently running.
    pub running: bool,
    /// Completion ratio in `0.0..=1.0`.
    #[serde(default)]
    pub progress: f32,
    /// Library currently being scanned.
    #[serde(default)]
    pub current_library: Option<String>,
}

/// Error envelope returned on non-2xx responses.
///
/// Read defensively: any field may be absent and the body may not be JSON at
/// all, in which case the client substitutes an empty envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code or human-readable message.
    #[serde(default)]
    pub error: Option<String>,
    /// Offending coordinates on 422 `missing_episodes` responses.
    #[serde(default)]
    pub missing_episodes: Vec<EpisodeRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_names() {
        let json = r#"{
            "id": 7,
            "tmdbId": 550,
            "title": "Fight Club",
            "mediaType": "movie",
            "status": "Partially_Available",
            "requestedBy": "tyler",
            "createdAt": "2026-01-02T03:04:05Z"
        }"#;
        let request: MediaRequest = serde_json::from_str(json).expect("request parses");
        assert_eq!(request.tmdb_id, 550);
        assert_eq!(request.media_type, MediaType::Movie);
        assert_eq!(request.status, "Partially_Available");
    }

    #[test]
    fn episode_flags_default_to_false() {
        let episode: Episode =
            serde_json::from_str(r#"{"episode_number": 3}"#).expect("episode parses");
        assert!(!episode.available);
        assert!(!episode.requested);
        assert!(!episode.downloading);
    }

    #[test]
    fn monitoring_option_round_trips_camel_case_tags() {
        let encoded = serde_json::to_string(&MonitoringOption::FirstSeason).expect("encodes");
        assert_eq!(encoded, r#""firstSeason""#);
        let decoded: MonitoringOption = serde_json::from_str(r#""none""#).expect("decodes");
        assert_eq!(decoded, MonitoringOption::None);
    }

    #[test]
    fn friendship_status_uses_snake_case_tags() {
        let decoded: FriendshipStatus =
            serde_json::from_str(r#""pending_sent""#).expect("decodes");
        assert_eq!(decoded, FriendshipStatus::PendingSent);
    }

    #[test]
    fn error_body_tolerates_empty_object() {
        let body: ErrorBody = serde_json::from_str("{}").expect("empty envelope parses");
        assert_eq!(body.error, None);
        assert!(body.missing_episodes.is_empty());
    }

    #[test]
    fn bulk_request_omits_absent_quality_profile() {
        let body = BulkEpisodeRequest {
            tmdb_id: 1399,
            seasons: vec![SeasonSelection {
                season_number: 1,
                episodes: vec![1, 2],
            }],
            monitoring: MonitoringOption::None,
            quality_profile_id: None,
        };
        let encoded = serde_json::to_string(&body).expect("encodes");
        assert!(!encoded.contains("quality_profile_id"));
    }

    #[test]
    fn admin_permission_implies_everything() {
        assert!(permissions::has(permissions::ADMIN, permissions::VIEW_RELEASES));
        assert!(permissions::has(
            permissions::MANAGE_REQUESTS,
            permissions::MANAGE_REQUESTS
        ));
        assert!(!permissions::has(
            permissions::MANAGE_REQUESTS,
            permissions::MANAGE_USERS
        ));
    }
}
