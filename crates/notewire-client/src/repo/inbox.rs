//! Inbox notifications.

use notewire_core::{last_segment, InboxMessage, InboxStatus, Result};

use crate::dto::{InboxMessageDto, ListInboxResponse, UpdateInboxRequest};
use crate::http::ApiClient;
use crate::version::Operation;

pub struct InboxRepository {
    client: ApiClient,
}

impl InboxRepository {
    pub fn new(client: ApiClient) -> Self {
        InboxRepository { client }
    }

    pub async fn list_inbox(&self) -> Result<Vec<InboxMessage>> {
        let builder = self.client.request(&Operation::ListInbox)?;
        let body: ListInboxResponse = self.client.send_json(builder).await?;
        Ok(body.inboxes.into_iter().map(InboxMessage::from).collect())
    }

    /// Mark a notification read or archived by its resource name
    /// (`"inboxes/12"`).
    pub async fn update_status(&self, name: &str, status: InboxStatus) -> Result<InboxMessage> {
        let builder = self
            .client
            .request(&Operation::UpdateInbox {
                id: last_segment(name),
            })?
            .query(&[("updateMask", "status")])
            .json(&UpdateInboxRequest {
                status: status.as_wire().to_string(),
            });
        Ok(InboxMessage::from(
            self.client.send_json::<InboxMessageDto>(builder).await?,
        ))
    }
}
