//! Dashboard: independent data panels composed into one view.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod achievements;
#[cfg(target_arch = "wasm32")]
pub(crate) mod continue_watching;
#[cfg(target_arch = "wasm32")]
pub(crate) mod friends_activity;
#[cfg(target_arch = "wasm32")]
pub(crate) mod recent_requests;
#[cfg(target_arch = "wasm32")]
pub(crate) mod recently_added;
#[cfg(target_arch = "wasm32")]
pub(crate) mod recommendations;
#[cfg(target_arch = "wasm32")]
pub(crate) mod service_health;
#[cfg(target_arch = "wasm32")]
pub(crate) mod shell;
#[cfg(target_arch = "wasm32")]
pub(crate) mod upcoming;
#[cfg(target_arch = "wasm32")]
pub(crate) mod watch_stats;
