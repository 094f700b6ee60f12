//! Canonical domain entities for the notewire client.
//!
//! These are the stable in-memory representations produced by the mapping
//! layer regardless of which server protocol revision the wire data came
//! from. Every closed-set field is an enum with an explicit [`Unknown`]
//! sentinel so that version skew in either direction degrades gracefully
//! instead of failing.
//!
//! Timestamps are kept as the RFC 3339 strings the wire carries; the client
//! never needs to do arithmetic on them.

use serde::{Deserialize, Serialize};

/// Extract the last path segment of a resource name (`"users/7"` → `"7"`).
pub fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Derive the numeric local id from a resource name (`"users/7"` → `7`).
/// Falls back to `0` when the segment is not numeric.
pub fn id_from_name(name: &str) -> i32 {
    last_segment(name).parse().unwrap_or(0)
}

// ─── Users ─────────────────────────────────────────────────────────────────

/// A server-side user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Resource name, e.g. `"users/7"`.
    pub name: String,
    /// Numeric id derived from `name`; `0` when not derivable.
    pub id: i32,
    pub role: UserRole,
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub avatar_url: String,
    pub description: String,
    pub create_time: String,
    pub update_time: String,
}

/// User role on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Host,
    Admin,
    User,
    /// Wire value not recognized by this client.
    Unknown,
}

impl UserRole {
    /// Classify a wire value. v0.24 emits numeric proto codes, newer
    /// revisions emit symbolic names; anything else is [`UserRole::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "HOST" | "1" => UserRole::Host,
            "ADMIN" | "2" => UserRole::Admin,
            "USER" | "3" => UserRole::User,
            _ => UserRole::Unknown,
        }
    }
}

/// Aggregate statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub memo_display_timestamps: Vec<String>,
    pub memo_type_stats: std::collections::BTreeMap<String, i64>,
    pub tag_count: std::collections::BTreeMap<String, i64>,
}

/// A personal API access token owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessToken {
    pub access_token: String,
    pub description: String,
    pub issued_at: String,
    pub expires_at: String,
}

// ─── Memos ─────────────────────────────────────────────────────────────────

/// A note. The one central entity of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Resource name, e.g. `"memos/101"`.
    pub name: String,
    /// Short uid; derived from `name` when the wire omits it.
    pub uid: String,
    /// Creator resource name.
    pub creator: String,
    pub create_time: String,
    pub update_time: String,
    pub display_time: String,
    pub content: String,
    pub visibility: Visibility,
    pub state: MemoState,
    pub pinned: bool,
    /// Attached files. v0.24 calls them resources, v0.25+ attachments; the
    /// mapper unions both wire lists.
    pub resources: Vec<Resource>,
    pub relations: Vec<MemoRelation>,
    pub reactions: Vec<Reaction>,
    pub tags: Vec<String>,
    pub snippet: String,
}

impl Memo {
    pub fn is_archived(&self) -> bool {
        self.state == MemoState::Archived
    }
}

/// One page of a memo listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoPage {
    pub memos: Vec<Memo>,
    /// Opaque continuation token; empty when this is the last page.
    pub next_page_token: String,
}

/// Memo visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Private,
    Protected,
    Public,
    Unknown,
}

impl Visibility {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "PRIVATE" | "1" => Visibility::Private,
            "PROTECTED" | "2" => Visibility::Protected,
            "PUBLIC" | "3" => Visibility::Public,
            _ => Visibility::Unknown,
        }
    }

    /// Symbolic wire form, used when sending visibility to the server.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Visibility::Private => "PRIVATE",
            Visibility::Protected => "PROTECTED",
            Visibility::Public => "PUBLIC",
            Visibility::Unknown => "VISIBILITY_UNSPECIFIED",
        }
    }
}

/// Memo lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoState {
    Normal,
    Archived,
    Unknown,
}

impl MemoState {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "NORMAL" | "1" => MemoState::Normal,
            "ARCHIVED" | "2" => MemoState::Archived,
            _ => MemoState::Unknown,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            MemoState::Normal => "NORMAL",
            MemoState::Archived => "ARCHIVED",
            MemoState::Unknown => "STATE_UNSPECIFIED",
        }
    }
}

// ─── Relations ─────────────────────────────────────────────────────────────

/// A directed link between two memos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRelation {
    /// Resource name of the owning memo.
    pub memo: String,
    /// Resource name of the related memo.
    pub related_memo: String,
    pub kind: RelationKind,
}

/// The kind of link between two memos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    Reference,
    Comment,
    Unknown,
}

impl RelationKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "REFERENCE" | "1" => RelationKind::Reference,
            "COMMENT" | "2" => RelationKind::Comment,
            _ => RelationKind::Unknown,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            RelationKind::Reference => "REFERENCE",
            RelationKind::Comment => "COMMENT",
            RelationKind::Unknown => "TYPE_UNSPECIFIED",
        }
    }
}

// ─── Reactions ─────────────────────────────────────────────────────────────

/// An emoji reaction attached to a memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: i32,
    pub creator: String,
    /// Resource name of the reacted-to content, e.g. `"memos/101"`.
    pub content_id: String,
    /// The emoji itself.
    pub reaction_type: String,
}

// ─── Resources ─────────────────────────────────────────────────────────────

/// A user-uploaded file linked to a memo. v0.24 servers call these
/// "resources", v0.25+ servers "attachments"; the domain concept is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name, e.g. `"resources/42"` or `"attachments/42"`.
    pub name: String,
    pub uid: String,
    pub create_time: String,
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes; `0` when the wire value is absent or unparseable.
    pub size: i64,
    /// Resource name of the owning memo, empty if unlinked.
    pub memo: String,
    /// External URL for link-type resources, empty for uploads.
    pub external_link: String,
}

impl Resource {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

// ─── Tags ──────────────────────────────────────────────────────────────────

/// A tag. Derived from memo content server-side; there is no tag CRUD in
/// the covered protocol revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub creator: String,
}

// ─── Webhooks ──────────────────────────────────────────────────────────────

/// An outbound webhook registered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: i32,
    pub creator_id: i32,
    pub name: String,
    pub url: String,
    pub create_time: String,
    pub update_time: String,
}

// ─── Inbox ─────────────────────────────────────────────────────────────────

/// A notification delivered to the user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub name: String,
    pub sender: String,
    pub receiver: String,
    pub status: InboxStatus,
    pub create_time: String,
    pub kind: InboxKind,
    pub activity_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxStatus {
    Unread,
    Read,
    Archived,
    Unknown,
}

impl InboxStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "UNREAD" => InboxStatus::Unread,
            "READ" => InboxStatus::Read,
            "ARCHIVED" => InboxStatus::Archived,
            _ => InboxStatus::Unknown,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            InboxStatus::Unread => "UNREAD",
            InboxStatus::Read => "READ",
            InboxStatus::Archived => "ARCHIVED",
            InboxStatus::Unknown => "STATUS_UNSPECIFIED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxKind {
    MemoComment,
    VersionUpdate,
    Unknown,
}

impl InboxKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "MEMO_COMMENT" => InboxKind::MemoComment,
            "VERSION_UPDATE" => InboxKind::VersionUpdate,
            _ => InboxKind::Unknown,
        }
    }
}

// ─── Workspace ─────────────────────────────────────────────────────────────

/// Read-only workspace profile (server identity and version string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceProfile {
    pub owner: String,
    pub version: String,
    pub mode: String,
}

// ─── Identity providers ────────────────────────────────────────────────────

/// An external identity provider configured on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProvider {
    pub name: String,
    pub id: i32,
    pub kind: IdentityProviderKind,
    pub title: String,
    pub identifier_filter: String,
    pub config: IdentityProviderConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityProviderKind {
    OAuth2,
    Unknown,
}

impl IdentityProviderKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "OAUTH2" => IdentityProviderKind::OAuth2,
            _ => IdentityProviderKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    pub oauth2: Option<OAuth2Config>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub user_info_url: String,
    pub scopes: Vec<String>,
    pub field_mapping: FieldMapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldMapping {
    pub identifier: String,
    pub display_name: String,
    pub email: String,
}
