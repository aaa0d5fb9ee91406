//! Friend-graph affordances and visibility gating.
//!
//! # Design
//! - The action button is a pure function of the server-computed
//!   `FriendshipStatus`.
//! - Friend status is never patched optimistically: every action triggers a
//!   full profile re-fetch, trading a round trip for guaranteed consistency
//!   with server-side mutual-block and visibility rules.

use vidarr_api_models::{FriendshipStatus, ProfileVisibility, UserProfile};

/// Rendered affordance for the friend action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FriendAffordance {
    /// "Add Friend" button.
    AddFriend,
    /// Disabled "Request Sent" button.
    RequestSent,
    /// "Accept Request" button.
    AcceptRequest,
    /// "Unfriend" button with a hover-label confirm swap.
    Unfriend,
    /// Render nothing.
    Hidden,
}

impl FriendAffordance {
    /// Translation key for the button label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::AddFriend => "social.add_friend",
            Self::RequestSent => "social.request_sent",
            Self::AcceptRequest => "social.accept_request",
            Self::Unfriend => "social.unfriend",
            Self::Hidden => "",
        }
    }

    /// Whether the button is rendered disabled.
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::RequestSent)
    }
}

/// Affordance for a profile's friend status.
#[must_use]
pub const fn affordance_for(status: FriendshipStatus) -> FriendAffordance {
    match status {
        FriendshipStatus::Friends => FriendAffordance::Unfriend,
        FriendshipStatus::PendingSent => FriendAffordance::RequestSent,
        FriendshipStatus::PendingReceived => FriendAffordance::AcceptRequest,
        FriendshipStatus::Blocked => FriendAffordance::Hidden,
        FriendshipStatus::None => FriendAffordance::AddFriend,
    }
}

/// Friend-graph actions a profile view can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FriendAction {
    /// Send a friend request.
    SendRequest,
    /// Cancel an outgoing request.
    CancelRequest,
    /// Accept an incoming request.
    AcceptRequest,
    /// Remove an existing friend.
    Unfriend,
    /// Block the user.
    Block,
}

impl FriendAction {
    /// Endpoint path for the action against `username`.
    #[must_use]
    pub fn path(self, username: &str) -> String {
        let username = urlencoding::encode(username);
        match self {
            Self::SendRequest | Self::CancelRequest => {
                format!("/api/v1/social/friends/{username}/request")
            }
            Self::AcceptRequest => format!("/api/v1/social/friends/{username}/accept"),
            Self::Unfriend => format!("/api/v1/social/friends/{username}"),
            Self::Block => format!("/api/v1/social/blocks/{username}"),
        }
    }

    /// Whether the action maps to an HTTP DELETE.
    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(self, Self::CancelRequest | Self::Unfriend)
    }
}

/// Whether the viewer may see the profile's stats/activity sections.
#[must_use]
pub const fn can_view_details(
    visibility: ProfileVisibility,
    status: FriendshipStatus,
    is_self: bool,
) -> bool {
    if is_self {
        return true;
    }
    match visibility {
        ProfileVisibility::Public => true,
        ProfileVisibility::Friends => matches!(status, FriendshipStatus::Friends),
        ProfileVisibility::Private => false,
    }
}

/// Rendered friend status for a profile view. Actions do not change it;
/// only a server-confirmed profile payload does.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileViewState {
    /// Last server-confirmed profile, when loaded.
    pub profile: Option<UserProfile>,
}

impl ProfileViewState {
    /// Record an action being fired. Deliberately does not touch the
    /// rendered status; the caller re-fetches the profile instead.
    pub const fn note_action(&mut self, _action: FriendAction) {}

    /// Apply a server-confirmed profile payload.
    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Current rendered friend status.
    #[must_use]
    pub fn friend_status(&self) -> Option<FriendshipStatus> {
        self.profile.as_ref().map(|profile| profile.friend_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(status: FriendshipStatus) -> UserProfile {
        UserProfile {
            id: 9,
            username: "mara".to_string(),
            avatar_url: None,
            visibility: ProfileVisibility::Public,
            friend_status: status,
            taste_overlap: None,
            request_count: 3,
        }
    }

    #[test]
    fn each_status_maps_to_one_affordance() {
        assert_eq!(affordance_for(FriendshipStatus::Friends), FriendAffordance::Unfriend);
        assert_eq!(
            affordance_for(FriendshipStatus::PendingSent),
            FriendAffordance::RequestSent
        );
        assert_eq!(
            affordance_for(FriendshipStatus::PendingReceived),
            FriendAffordance::AcceptRequest
        );
        assert_eq!(affordance_for(FriendshipStatus::Blocked), FriendAffordance::Hidden);
        assert_eq!(affordance_for(FriendshipStatus::None), FriendAffordance::AddFriend);
        assert!(affordance_for(FriendshipStatus::PendingSent).is_disabled());
    }

    #[test]
    fn rapid_actions_never_patch_the_rendered_status() {
        let mut state = ProfileViewState::default();
        state.apply_profile(profile(FriendshipStatus::None));

        // send_request then cancel_request fire before any re-fetch lands.
        state.note_action(FriendAction::SendRequest);
        state.note_action(FriendAction::CancelRequest);
        assert_eq!(state.friend_status(), Some(FriendshipStatus::None));

        // The re-fetch resolves with the server's final word.
        state.apply_profile(profile(FriendshipStatus::None));
        assert_eq!(state.friend_status(), Some(FriendshipStatus::None));
    }

    #[test]
    fn visibility_gates_details() {
        for (visibility, status, is_self, expected) in [
            (ProfileVisibility::Public, FriendshipStatus::None, false, true),
            (ProfileVisibility::Friends, FriendshipStatus::None, false, false),
            (ProfileVisibility::Friends, FriendshipStatus::Friends, false, true),
            (ProfileVisibility::Private, FriendshipStatus::Friends, false, false),
            (ProfileVisibility::Private, FriendshipStatus::None, true, true),
        ] {
            assert_eq!(
                can_view_details(visibility, status, is_self),
                expected,
                "{visibility:?} {status:?} self={is_self}"
            );
        }
    }

    #[test]
    fn action_paths_distinguish_create_and_delete() {
        assert_eq!(
            FriendAction::SendRequest.path("mara"),
            "/api/v1/social/friends/mara/request"
        );
        assert_eq!(
            FriendAction::CancelRequest.path("mara"),
            FriendAction::SendRequest.path("mara"),
            "cancel deletes the same resource the send created"
        );
        assert!(FriendAction::CancelRequest.is_delete());
        assert!(!FriendAction::SendRequest.is_delete());
        assert!(FriendAction::Unfriend.is_delete());
    }
}
