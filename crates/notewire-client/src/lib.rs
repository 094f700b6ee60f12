//! # notewire-client
//!
//! The multi-version API compatibility layer for the Memos note service.
//!
//! Three incompatible server protocol revisions (v0.24, v0.25, v0.26+) are
//! hidden behind one set of version-agnostic repositories returning the
//! canonical domain entities from [`notewire_core`]. The moving parts:
//!
//! - [`version`] — the [`version::ServerVersion`] registry and the
//!   [`version::Operation`] endpoint selector, one exhaustive table for
//!   every operation × version combination.
//! - [`auth`] — credential extraction from sign-in responses and the pure
//!   per-version auth-attachment function.
//! - [`session`] — observable session cells (token, server URL, version)
//!   and the persisted-session store.
//! - [`dto`] — wire DTOs, including the heterogeneous relation normalizer.
//! - [`mapper`] — total, non-throwing DTO → domain conversions.
//! - [`repo`] — the repository surface callers actually use.

pub mod auth;
pub mod dto;
pub mod http;
pub mod mapper;
pub mod repo;
pub mod session;
pub mod version;

pub use http::ApiClient;
pub use repo::auth::{AuthRepository, SessionPhase};
pub use repo::inbox::InboxRepository;
pub use repo::memo::MemoRepository;
pub use repo::resource::ResourceRepository;
pub use repo::tag::TagRepository;
pub use repo::user::UserRepository;
pub use repo::workspace::WorkspaceRepository;
pub use session::{FileSessionStore, MemorySessionStore, PersistedSession, Session, SessionStore};
pub use version::{Operation, Route, ServerVersion};
