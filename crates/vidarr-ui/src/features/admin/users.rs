//! User permission editing helpers.

use vidarr_api_models::permissions;

/// Permission rows shown in the editor, in display order.
pub const PERMISSION_ROWS: [(u64, &str); 5] = [
    (permissions::ADMIN, "admin.perm_admin"),
    (permissions::MANAGE_REQUESTS, "admin.perm_manage_requests"),
    (permissions::MANAGE_USERS, "admin.perm_manage_users"),
    (permissions::AUTO_APPROVE, "admin.perm_auto_approve"),
    (permissions::VIEW_RELEASES, "admin.perm_view_releases"),
];

/// Flip one permission bit.
#[must_use]
pub const fn toggle_permission(mask: u64, bit: u64) -> u64 {
    mask ^ bit
}

/// Whether the mask carries `bit` explicitly (the editor shows the stored
/// bits, not the implied admin expansion).
#[must_use]
pub const fn has_explicit(mask: u64, bit: u64) -> bool {
    mask & bit != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_shows_stored_bits_not_admin_expansion() {
        let mask = permissions::ADMIN;
        assert!(has_explicit(mask, permissions::ADMIN));
        assert!(!has_explicit(mask, permissions::MANAGE_USERS));
        // The effective check still expands admin.
        assert!(permissions::has(mask, permissions::MANAGE_USERS));
    }

    #[test]
    fn toggling_round_trips() {
        let mask = toggle_permission(0, permissions::AUTO_APPROVE);
        assert!(has_explicit(mask, permissions::AUTO_APPROVE));
        assert_eq!(toggle_permission(mask, permissions::AUTO_APPROVE), 0);
    }
}
