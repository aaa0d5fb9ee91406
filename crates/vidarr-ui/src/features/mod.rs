//! Feature modules: one directory per portal surface.

pub mod admin;
pub mod dashboard;
pub mod lists;
pub mod requests;
pub mod social;
