//! Notification endpoint editing helpers.

use vidarr_api_models::{NotificationEndpoint, notification_types};

/// Flip one event-type bit in an endpoint's subscription mask.
#[must_use]
pub const fn toggle_type(mask: u64, bit: u64) -> u64 {
    mask ^ bit
}

/// Whether the mask subscribes to `bit`.
#[must_use]
pub const fn has_type(mask: u64, bit: u64) -> bool {
    mask & bit != 0
}

/// Global endpoints are managed by the server and read-only for delete.
#[must_use]
pub const fn can_delete(endpoint: &NotificationEndpoint) -> bool {
    !endpoint.is_global
}

/// Labels for the subscribed event types, in editor order.
#[must_use]
pub fn subscribed_labels(mask: u64) -> Vec<&'static str> {
    notification_types::ALL
        .iter()
        .filter(|(bit, _)| has_type(mask, *bit))
        .map(|(_, label)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn endpoint(is_global: bool, types: u64) -> NotificationEndpoint {
        NotificationEndpoint {
            id: Uuid::nil(),
            name: "ops webhook".to_string(),
            kind: "webhook".to_string(),
            enabled: true,
            is_global,
            types,
            config: serde_json::Value::Null,
        }
    }

    #[test]
    fn toggling_is_an_involution() {
        let mask = notification_types::REQUEST_CREATED;
        let toggled = toggle_type(mask, notification_types::MEDIA_AVAILABLE);
        assert!(has_type(toggled, notification_types::MEDIA_AVAILABLE));
        assert_eq!(
            toggle_type(toggled, notification_types::MEDIA_AVAILABLE),
            mask
        );
    }

    #[test]
    fn global_endpoints_cannot_be_deleted() {
        assert!(!can_delete(&endpoint(true, 0)));
        assert!(can_delete(&endpoint(false, 0)));
    }

    #[test]
    fn labels_follow_editor_order() {
        let mask =
            notification_types::MEDIA_FAILED | notification_types::REQUEST_APPROVED;
        assert_eq!(
            subscribed_labels(mask),
            vec!["Request approved", "Media failed"]
        );
    }
}
