//! Wire DTOs for all three protocol revisions.
//!
//! Field names follow the server's camelCase JSON. Every response field
//! that any revision may omit carries a default, so decoding never fails
//! on missing data; the mapper layer turns the defaults into the
//! documented domain fallbacks. Request DTOs skip `None` fields rather
//! than sending nulls — the gRPC gateway rejects empty fields it does not
//! expect.

pub mod relation;

pub use relation::{MemoRelationDto, RelatedMemoRefDto};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Auth ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequestBody {
    pub password_credentials: PasswordCredentials,
    pub never_expire: bool,
}

impl SignInRequestBody {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        SignInRequestBody {
            password_credentials: PasswordCredentials {
                username: username.into(),
                password: password.into(),
            },
            never_expire: true,
        }
    }
}

/// v0.26 sign-in response: the token travels in the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInResponseV026 {
    pub user: Option<UserDto>,
    pub access_token: Option<String>,
    pub access_token_expires_at: Option<String>,
}

/// v0.25 sign-in / session response: the token travels in a cookie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionResponse {
    pub user: Option<UserDto>,
    pub last_accessed_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetCurrentUserResponse {
    pub user: Option<UserDto>,
}

// ─── Users ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDto {
    pub name: String,
    pub role: String,
    pub username: String,
    pub email: String,
    pub nickname: String,
    /// v0.26 field superseding `nickname`.
    pub display_name: String,
    pub avatar_url: String,
    pub description: String,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatsDto {
    pub memo_display_timestamps: Option<Vec<String>>,
    pub memo_type_stats: Option<BTreeMap<String, i64>>,
    pub tag_count: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessTokenRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListAccessTokensResponse {
    pub access_tokens: Vec<AccessTokenDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessTokenDto {
    pub access_token: String,
    pub description: String,
    pub issued_at: String,
    pub expires_at: Option<String>,
}

// ─── Memos ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMemosResponse {
    pub memos: Vec<MemoDto>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoDto {
    pub name: String,
    pub uid: String,
    pub creator: String,
    pub create_time: String,
    pub update_time: String,
    pub display_time: String,
    pub content: String,
    pub visibility: String,
    pub state: String,
    pub pinned: bool,
    /// v0.24 file list.
    pub resources: Option<Vec<ResourceDto>>,
    /// v0.25+ file list. A response populates one of the two; the mapper
    /// unions both rather than assuming which.
    pub attachments: Option<Vec<ResourceDto>>,
    pub relations: Option<Vec<MemoRelationDto>>,
    pub reactions: Option<Vec<ReactionDto>>,
    pub tags: Option<Vec<String>>,
    pub snippet: Option<String>,
}

impl Default for MemoDto {
    /// Absent visibility and state decode to the server defaults rather
    /// than empty strings.
    fn default() -> Self {
        MemoDto {
            name: String::new(),
            uid: String::new(),
            creator: String::new(),
            create_time: String::new(),
            update_time: String::new(),
            display_time: String::new(),
            content: String::new(),
            visibility: "PRIVATE".to_string(),
            state: "NORMAL".to_string(),
            pinned: false,
            resources: None,
            attachments: None,
            relations: None,
            reactions: None,
            tags: None,
            snippet: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMemoRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoUpdateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListMemoCommentsResponse {
    pub memos: Vec<MemoDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReactionDto {
    pub id: i32,
    pub name: String,
    pub creator: String,
    pub content_id: String,
    pub reaction_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpsertReactionRequest {
    pub reaction: ReactionFields,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionFields {
    pub content_id: String,
    pub reaction_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListMemoReactionsResponse {
    pub reactions: Vec<ReactionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetMemoRelationsRequest {
    pub relations: Vec<MemoRelationDto>,
}

/// Minimal reference with only `name` — sending empty sibling fields
/// breaks gRPC-gateway parsing on older servers.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetMemoResourcesRequest {
    pub resources: Vec<ResourceRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetMemoAttachmentsRequest {
    pub attachments: Vec<ResourceRef>,
}

// ─── Resources ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceDto {
    pub name: String,
    pub uid: String,
    pub create_time: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// The wire carries size as a decimal string.
    pub size: String,
    pub memo: Option<String>,
    pub external_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListResourcesResponse {
    /// v0.24 collection name.
    pub resources: Vec<ResourceDto>,
    /// v0.25+ collection name.
    pub attachments: Vec<ResourceDto>,
}

impl ListResourcesResponse {
    /// Unified accessor over the version-split collection names.
    pub fn into_all(self) -> Vec<ResourceDto> {
        let mut all = self.resources;
        all.extend(self.attachments);
        all
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub content: String,
}

// ─── Inbox ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboxMessageDto {
    pub name: String,
    pub sender: String,
    pub receiver: String,
    pub status: String,
    pub create_time: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub activity_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListInboxResponse {
    pub inboxes: Vec<InboxMessageDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateInboxRequest {
    pub status: String,
}

// ─── Webhooks ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookDto {
    pub id: i32,
    pub creator_id: i32,
    pub name: String,
    pub url: String,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookRequest {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListWebhooksResponse {
    pub webhooks: Vec<WebhookDto>,
}

// ─── Workspace ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceProfileDto {
    pub owner: String,
    pub version: String,
    pub mode: String,
}

// ─── Identity providers ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityProviderDto {
    pub name: Option<String>,
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub identifier_filter: Option<String>,
    pub config: Option<IdentityProviderConfigDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityProviderConfigDto {
    pub oauth2_config: Option<OAuth2ConfigDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OAuth2ConfigDto {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub auth_url: Option<String>,
    pub token_url: Option<String>,
    pub user_info_url: Option<String>,
    pub scopes: Option<Vec<String>>,
    pub field_mapping: Option<FieldMappingDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldMappingDto {
    pub identifier: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListIdentityProvidersResponse {
    pub identity_providers: Vec<IdentityProviderDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_dto_decodes_with_only_name() {
        let memo: MemoDto = serde_json::from_str(r#"{"name":"memos/1"}"#).unwrap();
        assert_eq!(memo.name, "memos/1");
        assert_eq!(memo.visibility, "PRIVATE");
        assert_eq!(memo.state, "NORMAL");
        assert!(memo.resources.is_none());
        assert!(memo.attachments.is_none());
    }

    #[test]
    fn test_sign_in_body_shape() {
        let body = SignInRequestBody::new("alice", "secret");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["passwordCredentials"]["username"], "alice");
        assert_eq!(json["passwordCredentials"]["password"], "secret");
        assert_eq!(json["neverExpire"], true);
    }

    #[test]
    fn test_update_user_request_skips_absent_fields() {
        let req = UpdateUserRequest {
            nickname: Some("Alice".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["nickname"], "Alice");
        assert!(json.get("email").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_resource_dto_renames_type_field() {
        let res: ResourceDto =
            serde_json::from_str(r#"{"name":"attachments/1","type":"image/png","size":"2048"}"#)
                .unwrap();
        assert_eq!(res.mime_type, "image/png");
        assert_eq!(res.size, "2048");
    }

    #[test]
    fn test_list_resources_union_accessor() {
        let resp: ListResourcesResponse = serde_json::from_str(
            r#"{"resources":[{"name":"resources/1"}],"attachments":[{"name":"attachments/2"}]}"#,
        )
        .unwrap();
        let all = resp.into_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "resources/1");
        assert_eq!(all[1].name, "attachments/2");
    }

    #[test]
    fn test_resource_ref_serializes_name_only() {
        let req = SetMemoAttachmentsRequest {
            attachments: vec![ResourceRef {
                name: "attachments/5".into(),
            }],
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"attachments":[{"name":"attachments/5"}]}"#
        );
    }
}
