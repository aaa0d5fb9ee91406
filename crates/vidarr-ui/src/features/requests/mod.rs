//! Request browsing, status classification, and the episode-request wizard.

pub mod logic;
pub mod prefetch;
pub mod wizard;

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
