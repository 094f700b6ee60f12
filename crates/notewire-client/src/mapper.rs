//! Wire DTO → domain conversions.
//!
//! Every conversion is total and non-throwing: absent wire fields become
//! empty strings/lists/maps or zero, closed-set strings go through the
//! `from_wire` classifiers (which degrade to `Unknown`), and the
//! version-split `resources`/`attachments` lists are unioned because a
//! response populates only one of the two but the client must not assume
//! which.

use notewire_core::{
    id_from_name, last_segment, FieldMapping, IdentityProvider, IdentityProviderConfig,
    IdentityProviderKind, InboxKind, InboxMessage, InboxStatus, Memo, MemoRelation, MemoState,
    OAuth2Config, Reaction, RelationKind, Resource, User, UserAccessToken, UserRole, UserStats,
    Visibility, Webhook, WorkspaceProfile,
};

use crate::dto;

impl From<dto::UserDto> for User {
    fn from(d: dto::UserDto) -> Self {
        User {
            id: id_from_name(&d.name),
            role: UserRole::from_wire(&d.role),
            // v0.26 renamed nickname to displayName; prefer whichever is set
            nickname: if d.nickname.is_empty() {
                d.display_name
            } else {
                d.nickname
            },
            name: d.name,
            username: d.username,
            email: d.email,
            avatar_url: d.avatar_url,
            description: d.description,
            create_time: d.create_time,
            update_time: d.update_time,
        }
    }
}

impl From<dto::MemoDto> for Memo {
    fn from(d: dto::MemoDto) -> Self {
        let mut files = d.resources.unwrap_or_default();
        files.extend(d.attachments.unwrap_or_default());
        Memo {
            uid: if d.uid.is_empty() {
                last_segment(&d.name).to_string()
            } else {
                d.uid
            },
            creator: d.creator,
            create_time: d.create_time,
            update_time: d.update_time,
            display_time: d.display_time,
            content: d.content,
            visibility: Visibility::from_wire(&d.visibility),
            state: MemoState::from_wire(&d.state),
            pinned: d.pinned,
            resources: files.into_iter().map(Resource::from).collect(),
            relations: d
                .relations
                .unwrap_or_default()
                .into_iter()
                .map(MemoRelation::from)
                .collect(),
            reactions: d
                .reactions
                .unwrap_or_default()
                .into_iter()
                .map(Reaction::from)
                .collect(),
            tags: d.tags.unwrap_or_default(),
            snippet: d.snippet.unwrap_or_default(),
            name: d.name,
        }
    }
}

impl From<dto::ResourceDto> for Resource {
    fn from(d: dto::ResourceDto) -> Self {
        Resource {
            uid: if d.uid.is_empty() {
                last_segment(&d.name).to_string()
            } else {
                d.uid
            },
            create_time: d.create_time,
            filename: d.filename,
            mime_type: d.mime_type,
            size: d.size.parse().unwrap_or(0),
            memo: d.memo.unwrap_or_default(),
            external_link: d.external_link.unwrap_or_default(),
            name: d.name,
        }
    }
}

impl From<dto::MemoRelationDto> for MemoRelation {
    fn from(d: dto::MemoRelationDto) -> Self {
        MemoRelation {
            memo: d.memo.name,
            related_memo: d.related_memo.name,
            kind: RelationKind::from_wire(&d.kind),
        }
    }
}

impl From<dto::ReactionDto> for Reaction {
    fn from(d: dto::ReactionDto) -> Self {
        Reaction {
            // v0.26 drops the numeric id field; derive it from the name
            id: if d.id != 0 { d.id } else { id_from_name(&d.name) },
            creator: d.creator,
            content_id: d.content_id,
            reaction_type: d.reaction_type,
        }
    }
}

impl From<dto::UserStatsDto> for UserStats {
    fn from(d: dto::UserStatsDto) -> Self {
        UserStats {
            memo_display_timestamps: d.memo_display_timestamps.unwrap_or_default(),
            memo_type_stats: d.memo_type_stats.unwrap_or_default(),
            tag_count: d.tag_count.unwrap_or_default(),
        }
    }
}

impl From<dto::AccessTokenDto> for UserAccessToken {
    fn from(d: dto::AccessTokenDto) -> Self {
        UserAccessToken {
            access_token: d.access_token,
            description: d.description,
            issued_at: d.issued_at,
            expires_at: d.expires_at.unwrap_or_default(),
        }
    }
}

impl From<dto::WebhookDto> for Webhook {
    fn from(d: dto::WebhookDto) -> Self {
        Webhook {
            id: d.id,
            creator_id: d.creator_id,
            name: d.name,
            url: d.url,
            create_time: d.create_time,
            update_time: d.update_time,
        }
    }
}

impl From<dto::InboxMessageDto> for InboxMessage {
    fn from(d: dto::InboxMessageDto) -> Self {
        InboxMessage {
            name: d.name,
            sender: d.sender,
            receiver: d.receiver,
            status: InboxStatus::from_wire(&d.status),
            create_time: d.create_time,
            kind: InboxKind::from_wire(d.kind.as_deref().unwrap_or_default()),
            activity_id: d.activity_id,
        }
    }
}

impl From<dto::WorkspaceProfileDto> for WorkspaceProfile {
    fn from(d: dto::WorkspaceProfileDto) -> Self {
        WorkspaceProfile {
            owner: d.owner,
            version: d.version,
            mode: d.mode,
        }
    }
}

impl From<dto::IdentityProviderDto> for IdentityProvider {
    fn from(d: dto::IdentityProviderDto) -> Self {
        IdentityProvider {
            name: d.name.unwrap_or_default(),
            id: d.id.unwrap_or_default(),
            kind: IdentityProviderKind::from_wire(d.kind.as_deref().unwrap_or_default()),
            title: d.title.unwrap_or_default(),
            identifier_filter: d.identifier_filter.unwrap_or_default(),
            config: d.config.map(IdentityProviderConfig::from).unwrap_or_default(),
        }
    }
}

impl From<dto::IdentityProviderConfigDto> for IdentityProviderConfig {
    fn from(d: dto::IdentityProviderConfigDto) -> Self {
        IdentityProviderConfig {
            oauth2: d.oauth2_config.map(OAuth2Config::from),
        }
    }
}

impl From<dto::OAuth2ConfigDto> for OAuth2Config {
    fn from(d: dto::OAuth2ConfigDto) -> Self {
        OAuth2Config {
            client_id: d.client_id.unwrap_or_default(),
            client_secret: d.client_secret.unwrap_or_default(),
            auth_url: d.auth_url.unwrap_or_default(),
            token_url: d.token_url.unwrap_or_default(),
            user_info_url: d.user_info_url.unwrap_or_default(),
            scopes: d.scopes.unwrap_or_default(),
            field_mapping: d.field_mapping.map(FieldMapping::from).unwrap_or_default(),
        }
    }
}

impl From<dto::FieldMappingDto> for FieldMapping {
    fn from(d: dto::FieldMappingDto) -> Self {
        FieldMapping {
            identifier: d.identifier.unwrap_or_default(),
            display_name: d.display_name.unwrap_or_default(),
            email: d.email.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_mapping_derives_id_and_classifies_role() {
        let dto: dto::UserDto = serde_json::from_value(json!({
            "name": "users/7",
            "role": "HOST",
            "username": "alice"
        }))
        .unwrap();
        let user = User::from(dto);
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Host);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_unknown_role_maps_to_sentinel_not_error() {
        let dto = dto::UserDto {
            name: "users/7".into(),
            role: "UNKNOWN_ROLE_STRING".into(),
            ..Default::default()
        };
        assert_eq!(User::from(dto).role, UserRole::Unknown);
    }

    #[test]
    fn test_nickname_falls_back_to_display_name() {
        let dto = dto::UserDto {
            name: "users/7".into(),
            display_name: "Alice D".into(),
            ..Default::default()
        };
        assert_eq!(User::from(dto).nickname, "Alice D");

        let dto = dto::UserDto {
            name: "users/7".into(),
            nickname: "alice".into(),
            display_name: "Alice D".into(),
            ..Default::default()
        };
        assert_eq!(User::from(dto).nickname, "alice");
    }

    #[test]
    fn test_memo_mapping_unions_resources_and_attachments() {
        let dto: dto::MemoDto = serde_json::from_value(json!({
            "name": "memos/1",
            "resources": [{"name": "resources/10", "size": "5"}],
            "attachments": [{"name": "attachments/11", "size": "6"}]
        }))
        .unwrap();
        let memo = Memo::from(dto);
        assert_eq!(memo.resources.len(), 2);
        assert_eq!(memo.resources[0].name, "resources/10");
        assert_eq!(memo.resources[1].name, "attachments/11");
    }

    #[test]
    fn test_memo_mapping_defaults_for_absent_fields() {
        let dto: dto::MemoDto = serde_json::from_value(json!({"name": "memos/42"})).unwrap();
        let memo = Memo::from(dto);
        assert_eq!(memo.uid, "42");
        assert!(memo.relations.is_empty());
        assert!(memo.reactions.is_empty());
        assert!(memo.tags.is_empty());
        assert_eq!(memo.snippet, "");
        assert_eq!(memo.visibility, Visibility::Private);
        assert_eq!(memo.state, MemoState::Normal);
    }

    #[test]
    fn test_resource_size_string_parses_with_fallback() {
        let dto = dto::ResourceDto {
            name: "attachments/9".into(),
            size: "2048".into(),
            ..Default::default()
        };
        assert_eq!(Resource::from(dto).size, 2048);

        let dto = dto::ResourceDto {
            name: "attachments/9".into(),
            size: "not-a-number".into(),
            ..Default::default()
        };
        assert_eq!(Resource::from(dto).size, 0);
    }

    #[test]
    fn test_relation_mapping_classifies_kind() {
        let dto: dto::MemoRelationDto = serde_json::from_value(json!({
            "memo": "memos/1", "relatedMemo": "memos/2", "type": 1
        }))
        .unwrap();
        let relation = MemoRelation::from(dto);
        assert_eq!(relation.kind, RelationKind::Reference);
        assert_eq!(relation.memo, "memos/1");
        assert_eq!(relation.related_memo, "memos/2");
    }

    #[test]
    fn test_reaction_id_falls_back_to_name_segment() {
        let dto = dto::ReactionDto {
            id: 0,
            name: "reactions/33".into(),
            ..Default::default()
        };
        assert_eq!(Reaction::from(dto).id, 33);

        let dto = dto::ReactionDto {
            id: 12,
            name: "reactions/33".into(),
            ..Default::default()
        };
        assert_eq!(Reaction::from(dto).id, 12);
    }

    #[test]
    fn test_inbox_mapping_with_null_kind() {
        let dto: dto::InboxMessageDto = serde_json::from_value(json!({
            "name": "inboxes/5",
            "sender": "users/1",
            "receiver": "users/7",
            "status": "UNREAD",
            "createTime": "2026-01-01T00:00:00Z",
            "type": null,
            "activityId": null
        }))
        .unwrap();
        let message = InboxMessage::from(dto);
        assert_eq!(message.status, InboxStatus::Unread);
        assert_eq!(message.kind, InboxKind::Unknown);
        assert_eq!(message.activity_id, None);
    }

    #[test]
    fn test_identity_provider_mapping_defaults() {
        let dto: dto::IdentityProviderDto = serde_json::from_value(json!({
            "name": "identityProviders/1",
            "type": "OAUTH2",
            "config": {"oauth2Config": {"clientId": "cid", "scopes": ["email"]}}
        }))
        .unwrap();
        let idp = IdentityProvider::from(dto);
        assert_eq!(idp.kind, IdentityProviderKind::OAuth2);
        let oauth2 = idp.config.oauth2.unwrap();
        assert_eq!(oauth2.client_id, "cid");
        assert_eq!(oauth2.scopes, vec!["email"]);
        assert_eq!(oauth2.field_mapping, FieldMapping::default());
    }

    #[test]
    fn test_user_stats_mapping_defaults_to_empty_collections() {
        let dto: dto::UserStatsDto = serde_json::from_value(json!({})).unwrap();
        let stats = UserStats::from(dto);
        assert!(stats.memo_display_timestamps.is_empty());
        assert!(stats.memo_type_stats.is_empty());
        assert!(stats.tag_count.is_empty());
    }
}
