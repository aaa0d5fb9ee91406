//! Social graph: profiles, friend actions, taste overlap.

pub mod logic;

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
