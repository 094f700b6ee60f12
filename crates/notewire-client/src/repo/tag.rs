//! Tag listing derived from per-user statistics.
//!
//! No server revision exposes a standalone tag collection; tags exist only
//! as the `tagCount` map inside user stats, so creation and deletion are
//! local no-ops that the next stats fetch reconciles.

use tokio::sync::watch;
use tracing::debug;

use notewire_core::{Result, Tag, User};

use crate::dto::UserStatsDto;
use crate::http::ApiClient;
use crate::version::Operation;

pub struct TagRepository {
    client: ApiClient,
    current_user: watch::Receiver<Option<User>>,
}

impl TagRepository {
    pub fn new(client: ApiClient, current_user: watch::Receiver<Option<User>>) -> Self {
        TagRepository {
            client,
            current_user,
        }
    }

    /// List the signed-in user's tags, sorted by name. Signed out, the
    /// list is empty without a network call.
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let Some(user) = self.current_user.borrow().clone() else {
            return Ok(Vec::new());
        };
        let builder = self.client.request(&Operation::GetUserStats {
            id: &user.id.to_string(),
        })?;
        let stats: UserStatsDto = self.client.send_json(builder).await?;
        Ok(stats
            .tag_count
            .unwrap_or_default()
            .into_keys()
            .map(|name| Tag {
                name,
                creator: user.name.clone(),
            })
            .collect())
    }

    /// Tags come into being by appearing in memo content.
    pub async fn upsert_tag(&self, name: &str) -> Result<()> {
        debug!(tag = name, "tag upsert is local-only");
        Ok(())
    }

    /// Removing the tag from memo content is the only real deletion.
    pub async fn delete_tag(&self, name: &str) -> Result<()> {
        debug!(tag = name, "tag delete is local-only");
        Ok(())
    }
}
