//! Memo CRUD, comments, reactions, relations, and file linkage.

use tracing::debug;

use notewire_core::{
    last_segment, Memo, MemoPage, MemoRelation, MemoState, Reaction, Result, Visibility,
};

use crate::dto::{
    CreateMemoRequest, ListMemoCommentsResponse, ListMemoReactionsResponse, ListMemosResponse,
    MemoDto, MemoRelationDto, MemoUpdateFields, ReactionDto, ReactionFields, RelatedMemoRefDto,
    ResourceRef, SetMemoAttachmentsRequest, SetMemoRelationsRequest, SetMemoResourcesRequest,
    UpsertReactionRequest,
};
use crate::http::ApiClient;
use crate::version::{Operation, ServerVersion};

/// Default page size for memo listings.
pub const DEFAULT_PAGE_SIZE: i32 = 20;

pub struct MemoRepository {
    client: ApiClient,
}

impl MemoRepository {
    pub fn new(client: ApiClient) -> Self {
        MemoRepository { client }
    }

    /// Fetch one page of memos. `page_token` comes from the previous
    /// page's [`MemoPage::next_page_token`].
    pub async fn list_memos(
        &self,
        page_size: i32,
        page_token: Option<&str>,
        filter: Option<&str>,
        state: Option<MemoState>,
    ) -> Result<MemoPage> {
        let mut builder = self
            .client
            .request(&Operation::ListMemos)?
            .query(&[("pageSize", page_size.to_string())]);
        if let Some(token) = page_token {
            builder = builder.query(&[("pageToken", token)]);
        }
        if let Some(filter) = filter {
            builder = builder.query(&[("filter", filter)]);
        }
        if let Some(state) = state {
            builder = builder.query(&[("state", state.as_wire())]);
        }
        let body: ListMemosResponse = self.client.send_json(builder).await?;
        Ok(MemoPage {
            memos: body.memos.into_iter().map(Memo::from).collect(),
            next_page_token: body.next_page_token.unwrap_or_default(),
        })
    }

    pub async fn get_memo(&self, id: &str) -> Result<Memo> {
        let builder = self.client.request(&Operation::GetMemo { id })?;
        Ok(Memo::from(self.client.send_json::<MemoDto>(builder).await?))
    }

    pub async fn create_memo(
        &self,
        content: &str,
        visibility: Option<Visibility>,
    ) -> Result<Memo> {
        let builder = self
            .client
            .request(&Operation::CreateMemo)?
            .json(&CreateMemoRequest {
                content: content.to_string(),
                visibility: visibility.map(|v| v.as_wire().to_string()),
            });
        Ok(Memo::from(self.client.send_json::<MemoDto>(builder).await?))
    }

    pub async fn update_memo(
        &self,
        id: &str,
        content: Option<&str>,
        visibility: Option<Visibility>,
    ) -> Result<Memo> {
        let mut mask = Vec::new();
        let fields = MemoUpdateFields {
            content: content.map(|c| {
                mask.push("content");
                c.to_string()
            }),
            visibility: visibility.map(|v| {
                mask.push("visibility");
                v.as_wire().to_string()
            }),
            state: None,
        };
        self.patch_memo(id, &fields, &mask.join(",")).await
    }

    pub async fn delete_memo(&self, id: &str) -> Result<()> {
        let builder = self.client.request(&Operation::DeleteMemo { id })?;
        self.client.send_unit(builder).await
    }

    pub async fn archive_memo(&self, id: &str) -> Result<Memo> {
        self.set_state(id, MemoState::Archived).await
    }

    pub async fn restore_memo(&self, id: &str) -> Result<Memo> {
        self.set_state(id, MemoState::Normal).await
    }

    async fn set_state(&self, id: &str, state: MemoState) -> Result<Memo> {
        let fields = MemoUpdateFields {
            state: Some(state.as_wire().to_string()),
            ..Default::default()
        };
        self.patch_memo(id, &fields, "state").await
    }

    async fn patch_memo(
        &self,
        id: &str,
        fields: &MemoUpdateFields,
        update_mask: &str,
    ) -> Result<Memo> {
        let builder = self
            .client
            .request(&Operation::UpdateMemo { id })?
            .query(&[("updateMask", update_mask)])
            .json(fields);
        Ok(Memo::from(self.client.send_json::<MemoDto>(builder).await?))
    }

    pub async fn list_comments(&self, memo_id: &str) -> Result<Vec<Memo>> {
        let builder = self
            .client
            .request(&Operation::ListMemoComments { id: memo_id })?;
        let body: ListMemoCommentsResponse = self.client.send_json(builder).await?;
        Ok(body.memos.into_iter().map(Memo::from).collect())
    }

    pub async fn create_comment(&self, memo_id: &str, content: &str) -> Result<Memo> {
        let builder = self
            .client
            .request(&Operation::CreateMemoComment { id: memo_id })?
            .json(&CreateMemoRequest {
                content: content.to_string(),
                visibility: None,
            });
        Ok(Memo::from(self.client.send_json::<MemoDto>(builder).await?))
    }

    pub async fn list_reactions(&self, memo_id: &str) -> Result<Vec<Reaction>> {
        let builder = self
            .client
            .request(&Operation::ListMemoReactions { id: memo_id })?;
        let body: ListMemoReactionsResponse = self.client.send_json(builder).await?;
        Ok(body.reactions.into_iter().map(Reaction::from).collect())
    }

    pub async fn upsert_reaction(&self, memo_id: &str, reaction_type: &str) -> Result<Reaction> {
        let builder = self
            .client
            .request(&Operation::UpsertMemoReaction { id: memo_id })?
            .json(&UpsertReactionRequest {
                reaction: ReactionFields {
                    content_id: format!("memos/{memo_id}"),
                    reaction_type: reaction_type.to_string(),
                },
            });
        Ok(Reaction::from(
            self.client.send_json::<ReactionDto>(builder).await?,
        ))
    }

    /// Delete a reaction. Routed by the owning memo on v0.26, by global
    /// reaction id on earlier revisions.
    pub async fn delete_reaction(&self, memo_id: &str, reaction_id: i32) -> Result<()> {
        let builder = self
            .client
            .request(&Operation::DeleteReaction { memo_id, reaction_id })?;
        self.client.send_unit(builder).await
    }

    /// Replace the memo's relation list.
    pub async fn set_relations(&self, memo_id: &str, relations: &[MemoRelation]) -> Result<()> {
        let request = SetMemoRelationsRequest {
            relations: relations
                .iter()
                .map(|r| MemoRelationDto {
                    memo: RelatedMemoRefDto::named(&r.memo),
                    related_memo: RelatedMemoRefDto::named(&r.related_memo),
                    kind: r.kind.as_wire().to_string(),
                })
                .collect(),
        };
        let builder = self
            .client
            .request(&Operation::SetMemoRelations { id: memo_id })?
            .json(&request);
        self.client.send_unit(builder).await
    }

    /// Link uploaded files to a memo. The endpoint, verb, and body field
    /// name all changed in v0.25.
    pub async fn set_memo_resources(
        &self,
        memo_name: &str,
        resource_names: &[String],
    ) -> Result<()> {
        let id = last_segment(memo_name);
        let refs: Vec<ResourceRef> = resource_names
            .iter()
            .map(|name| ResourceRef { name: name.clone() })
            .collect();
        let version = self.client.session().server_version();
        debug!(
            server_version = version.as_tag(),
            memo = memo_name,
            count = refs.len(),
            "linking files to memo"
        );
        let builder = self
            .client
            .request(&Operation::SetMemoResources { id })?;
        let builder = match version {
            ServerVersion::V024 => builder.json(&SetMemoResourcesRequest { resources: refs }),
            ServerVersion::V025 | ServerVersion::V026 => {
                builder.json(&SetMemoAttachmentsRequest { attachments: refs })
            }
        };
        self.client.send_unit(builder).await
    }
}
