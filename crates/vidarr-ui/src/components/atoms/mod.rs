//! Shared UI atoms used across the shell and views.

pub(crate) mod empty_state;
pub(crate) mod pager_controls;
pub(crate) mod poster_card;
pub(crate) mod status_badge;

pub(crate) use empty_state::EmptyState;
pub(crate) use pager_controls::PagerControls;
pub(crate) use poster_card::PosterCard;
pub(crate) use status_badge::StatusBadge;
