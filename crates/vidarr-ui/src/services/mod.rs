//! HTTP client plumbing for the `/api/v1` REST API.

pub mod error;

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
