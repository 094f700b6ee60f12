//! # notewire-core
//!
//! Domain model, error taxonomy, and shared types for the notewire client.
//!
//! This crate holds everything the rest of the workspace agrees on: the
//! canonical in-memory entities (memos, users, resources, relations, ...),
//! the closed-set enums with their forward-compatible `Unknown` sentinels,
//! and the error type raised at the repository boundary.

pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
