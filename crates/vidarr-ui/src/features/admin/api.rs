//! Admin feature API calls.

use crate::services::api::ApiClient;
use crate::services::error::ApiError;
use serde::Serialize;
use uuid::Uuid;
use vidarr_api_models::{BackupValidation, NotificationEndpoint};

/// Fetch-cache key for the backups list.
pub(crate) const BACKUPS_KEY: &str = "/api/v1/admin/backups";
/// Fetch-cache key for the Jellyfin connection status.
pub(crate) const JELLYFIN_STATUS_KEY: &str = "/api/v1/admin/jellyfin/status";
/// Fetch-cache key for the Jellyfin library list.
pub(crate) const JELLYFIN_LIBRARIES_KEY: &str = "/api/v1/admin/jellyfin/libraries";
/// Fetch-cache key for scan progress (polled while a scan runs).
pub(crate) const JELLYFIN_SCAN_KEY: &str = "/api/v1/admin/jellyfin/scan";
/// Fetch-cache key for notification endpoints.
pub(crate) const NOTIFICATIONS_KEY: &str = "/api/v1/admin/notifications";
/// Fetch-cache key for the user list.
pub(crate) const USERS_KEY: &str = "/api/v1/admin/users";

pub(crate) async fn create_backup(client: &ApiClient) -> Result<(), ApiError> {
    client.post_empty(BACKUPS_KEY).await
}

pub(crate) async fn validate_backup(
    client: &ApiClient,
    name: &str,
) -> Result<BackupValidation, ApiError> {
    client
        .post_json(
            &format!("{BACKUPS_KEY}/{}/validate", urlencoding::encode(name)),
            &serde_json::json!({}),
        )
        .await
}

pub(crate) async fn delete_backup(client: &ApiClient, name: &str) -> Result<(), ApiError> {
    client
        .delete(&format!("{BACKUPS_KEY}/{}", urlencoding::encode(name)))
        .await
}

pub(crate) async fn set_library_enabled(
    client: &ApiClient,
    id: Uuid,
    enabled: bool,
) -> Result<(), ApiError> {
    #[derive(Serialize)]
    struct Body {
        enabled: bool,
    }
    client
        .put_json::<_, serde_json::Value>(
            &format!("{JELLYFIN_LIBRARIES_KEY}/{id}"),
            &Body { enabled },
        )
        .await
        .map(|_| ())
}

pub(crate) async fn start_scan(client: &ApiClient) -> Result<(), ApiError> {
    client.post_empty(JELLYFIN_SCAN_KEY).await
}

pub(crate) async fn save_endpoint(
    client: &ApiClient,
    endpoint: &NotificationEndpoint,
    is_new: bool,
) -> Result<NotificationEndpoint, ApiError> {
    if is_new {
        client.post_json(NOTIFICATIONS_KEY, endpoint).await
    } else {
        client
            .put_json(&format!("{NOTIFICATIONS_KEY}/{}", endpoint.id), endpoint)
            .await
    }
}

pub(crate) async fn delete_endpoint(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&format!("{NOTIFICATIONS_KEY}/{id}")).await
}

pub(crate) async fn save_user_permissions(
    client: &ApiClient,
    user_id: i64,
    permissions: u64,
) -> Result<(), ApiError> {
    #[derive(Serialize)]
    struct Body {
        permissions: u64,
    }
    client
        .put_json::<_, serde_json::Value>(
            &format!("{USERS_KEY}/{user_id}"),
            &Body { permissions },
        )
        .await
        .map(|_| ())
}
