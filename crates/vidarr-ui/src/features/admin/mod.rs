//! Admin settings: backups, Jellyfin sync, notification endpoints, users.

pub mod backups;
pub mod jellyfin;
pub mod notifications;
pub mod users;

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
