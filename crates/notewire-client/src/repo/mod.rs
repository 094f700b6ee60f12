//! Version-agnostic repository surface.
//!
//! Each repository issues [`crate::version::Operation`]s through the shared
//! [`crate::ApiClient`] and returns canonical domain entities; callers never
//! see which server revision is active.

pub mod auth;
pub mod inbox;
pub mod memo;
pub mod resource;
pub mod tag;
pub mod user;
pub mod workspace;
