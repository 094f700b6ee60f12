//! Server protocol revision registry and endpoint selector.
//!
//! [`ServerVersion`] enumerates the three backend revisions the client
//! supports. [`Operation`] names every logical API operation and resolves
//! it to a concrete [`Route`] for a given version in one exhaustive match,
//! so an unhandled operation × version combination is a compile error
//! rather than a runtime fallback.

use std::fmt;

use reqwest::Method;

/// One of the three supported backend protocol revisions, ordered oldest
/// to newest. Immutable once a session starts; switching requires
/// re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServerVersion {
    /// Memos v0.24.x
    V024,
    /// Memos v0.25.x
    V025,
    /// Memos v0.26 and later
    V026,
}

impl ServerVersion {
    /// All supported revisions, oldest first.
    pub const ALL: [ServerVersion; 3] = [
        ServerVersion::V024,
        ServerVersion::V025,
        ServerVersion::V026,
    ];

    /// Canonical tag persisted alongside the session.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ServerVersion::V024 => "V024",
            ServerVersion::V025 => "V025",
            ServerVersion::V026 => "V026",
        }
    }

    /// Parse a persisted tag. Unknown or absent tags default to the newest
    /// revision, matching what older builds of the client persisted.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("V024") => ServerVersion::V024,
            Some("V025") => ServerVersion::V025,
            Some("V026") => ServerVersion::V026,
            _ => ServerVersion::V026,
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerVersion::V024 => write!(f, "v0.24"),
            ServerVersion::V025 => write!(f, "v0.25"),
            ServerVersion::V026 => write!(f, "v0.26"),
        }
    }
}

/// A concrete HTTP method and path for one operation on one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    /// Path relative to the server base URL, no leading slash.
    pub path: String,
}

impl Route {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Route {
            method,
            path: path.into(),
        }
    }
}

/// Every logical API operation the repositories issue. Identifier fields
/// are the *last path segment* of the resource name (`"7"`, not
/// `"users/7"`) unless noted otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'a> {
    // auth
    SignIn,
    GetCurrentUser,
    SignOut,
    // memos
    ListMemos,
    CreateMemo,
    GetMemo { id: &'a str },
    UpdateMemo { id: &'a str },
    DeleteMemo { id: &'a str },
    ListMemoComments { id: &'a str },
    CreateMemoComment { id: &'a str },
    ListMemoReactions { id: &'a str },
    UpsertMemoReaction { id: &'a str },
    DeleteReaction { memo_id: &'a str, reaction_id: i32 },
    SetMemoRelations { id: &'a str },
    /// Link uploaded files to a memo; endpoint shape and verb differ by version.
    SetMemoResources { id: &'a str },
    // resources / attachments
    ListResources,
    CreateResource,
    DeleteResource { name_segment: &'a str },
    // users
    GetUser { id: &'a str },
    UpdateUser { id: &'a str },
    GetUserStats { id: &'a str },
    ListAccessTokens { user_id: &'a str },
    CreateAccessToken { user_id: &'a str },
    DeleteAccessToken { user_id: &'a str, token: &'a str },
    // webhooks
    ListWebhooks { user_id: &'a str },
    CreateWebhook,
    UpdateWebhook { id: i32 },
    DeleteWebhook { id: i32 },
    // inbox
    ListInbox,
    UpdateInbox { id: &'a str },
    // workspace
    GetWorkspaceProfile,
    ListIdentityProviders,
}

impl Operation<'_> {
    /// Resolve this operation to the method and path for `version`.
    ///
    /// Total over all operation × version combinations. When a newer
    /// revision kept the previous endpoint, the arms collapse, but the
    /// match itself stays exhaustive over [`Operation`].
    pub fn route(&self, version: ServerVersion) -> Route {
        use Operation as Op;
        use ServerVersion as V;

        match *self {
            Op::SignIn => match version {
                // v0.24 takes the credentials as query parameters
                V::V024 => Route::new(
                    Method::POST,
                    "api/v1/auth/signin",
                ),
                V::V025 => Route::new(Method::POST, "api/v1/auth/sessions"),
                V::V026 => Route::new(Method::POST, "api/v1/auth/signin"),
            },
            Op::GetCurrentUser => match version {
                V::V024 => Route::new(Method::POST, "api/v1/auth/status"),
                V::V025 => Route::new(Method::GET, "api/v1/auth/sessions/current"),
                V::V026 => Route::new(Method::GET, "api/v1/auth/me"),
            },
            Op::SignOut => match version {
                V::V024 | V::V026 => Route::new(Method::POST, "api/v1/auth/signout"),
                V::V025 => Route::new(Method::DELETE, "api/v1/auth/sessions/current"),
            },
            Op::ListMemos => Route::new(Method::GET, "api/v1/memos"),
            Op::CreateMemo => Route::new(Method::POST, "api/v1/memos"),
            Op::GetMemo { id } => Route::new(Method::GET, format!("api/v1/memos/{id}")),
            Op::UpdateMemo { id } => Route::new(Method::PATCH, format!("api/v1/memos/{id}")),
            Op::DeleteMemo { id } => Route::new(Method::DELETE, format!("api/v1/memos/{id}")),
            Op::ListMemoComments { id } => {
                Route::new(Method::GET, format!("api/v1/memos/{id}/comments"))
            }
            Op::CreateMemoComment { id } => {
                Route::new(Method::POST, format!("api/v1/memos/{id}/comments"))
            }
            Op::ListMemoReactions { id } => {
                Route::new(Method::GET, format!("api/v1/memos/{id}/reactions"))
            }
            Op::UpsertMemoReaction { id } => {
                Route::new(Method::POST, format!("api/v1/memos/{id}/reactions"))
            }
            Op::DeleteReaction { memo_id, reaction_id } => match version {
                // global reaction id up to v0.25, scoped under the memo from v0.26
                V::V024 | V::V025 => {
                    Route::new(Method::DELETE, format!("api/v1/reactions/{reaction_id}"))
                }
                V::V026 => Route::new(
                    Method::DELETE,
                    format!("api/v1/memos/{memo_id}/reactions/{reaction_id}"),
                ),
            },
            Op::SetMemoRelations { id } => {
                Route::new(Method::POST, format!("api/v1/memos/{id}/relations"))
            }
            Op::SetMemoResources { id } => match version {
                V::V024 => Route::new(Method::POST, format!("api/v1/memos/{id}/resources")),
                V::V025 | V::V026 => {
                    Route::new(Method::PATCH, format!("api/v1/memos/{id}/attachments"))
                }
            },
            Op::ListResources => match version {
                V::V024 => Route::new(Method::GET, "api/v1/resources"),
                V::V025 | V::V026 => Route::new(Method::GET, "api/v1/attachments"),
            },
            Op::CreateResource => match version {
                V::V024 => Route::new(Method::POST, "api/v1/resources"),
                V::V025 | V::V026 => Route::new(Method::POST, "api/v1/attachments"),
            },
            Op::DeleteResource { name_segment } => match version {
                V::V024 => Route::new(Method::DELETE, format!("api/v1/resources/{name_segment}")),
                V::V025 | V::V026 => {
                    Route::new(Method::DELETE, format!("api/v1/attachments/{name_segment}"))
                }
            },
            Op::GetUser { id } => Route::new(Method::GET, format!("api/v1/users/{id}")),
            Op::UpdateUser { id } => Route::new(Method::PATCH, format!("api/v1/users/{id}")),
            Op::GetUserStats { id } => match version {
                V::V024 => Route::new(Method::GET, format!("api/v1/users/{id}/stats")),
                V::V025 | V::V026 => Route::new(Method::GET, format!("api/v1/users/{id}:getStats")),
            },
            Op::ListAccessTokens { user_id } => {
                Route::new(Method::GET, access_token_collection(version, user_id))
            }
            Op::CreateAccessToken { user_id } => {
                Route::new(Method::POST, access_token_collection(version, user_id))
            }
            Op::DeleteAccessToken { user_id, token } => Route::new(
                Method::DELETE,
                format!("{}/{token}", access_token_collection(version, user_id)),
            ),
            Op::ListWebhooks { user_id } => match version {
                // top-level collection filtered by creator up to v0.24
                V::V024 => Route::new(
                    Method::GET,
                    format!("api/v1/webhooks?creator=users/{user_id}"),
                ),
                V::V025 | V::V026 => {
                    Route::new(Method::GET, format!("api/v1/users/{user_id}/webhooks"))
                }
            },
            Op::CreateWebhook => Route::new(Method::POST, "api/v1/webhooks"),
            Op::UpdateWebhook { id } => Route::new(Method::PATCH, format!("api/v1/webhooks/{id}")),
            Op::DeleteWebhook { id } => Route::new(Method::DELETE, format!("api/v1/webhooks/{id}")),
            Op::ListInbox => Route::new(Method::GET, "api/v1/inboxes"),
            Op::UpdateInbox { id } => Route::new(Method::PATCH, format!("api/v1/inboxes/{id}")),
            Op::GetWorkspaceProfile => Route::new(Method::GET, "api/v1/workspace/profile"),
            Op::ListIdentityProviders => Route::new(Method::GET, "api/v1/identityProviders"),
        }
    }
}

/// The access-token collection was renamed in every revision: snake_case,
/// then camelCase, then `personalAccessTokens`.
fn access_token_collection(version: ServerVersion, user_id: &str) -> String {
    match version {
        ServerVersion::V024 => format!("api/v1/users/{user_id}/access_tokens"),
        ServerVersion::V025 => format!("api/v1/users/{user_id}/accessTokens"),
        ServerVersion::V026 => format!("api/v1/users/{user_id}/personalAccessTokens"),
    }
}
