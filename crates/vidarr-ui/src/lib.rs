#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Vidarr web UI.
//!
//! Browser-side client for the media-request portal. All state mutation goes
//! through the `/api/v1` REST API; view code is wasm-only while the state,
//! pagination, classification, and cache modules compile natively so their
//! invariants can be tested without a browser.

pub mod core;
pub mod features;
pub mod i18n;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
