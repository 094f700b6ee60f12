//! User profiles, statistics, access tokens, and webhooks.

use notewire_core::{
    last_segment, Result, User, UserAccessToken, UserStats, Webhook,
};

use crate::dto::{
    AccessTokenDto, CreateAccessTokenRequest, CreateWebhookRequest, ListAccessTokensResponse,
    ListWebhooksResponse, UpdateUserRequest, UserDto, UserStatsDto, WebhookDto,
};
use crate::http::ApiClient;
use crate::version::Operation;

pub struct UserRepository {
    client: ApiClient,
}

impl UserRepository {
    pub fn new(client: ApiClient) -> Self {
        UserRepository { client }
    }

    /// Fetch a user by resource name (`"users/7"`) or bare id.
    pub async fn get_user(&self, name: &str) -> Result<User> {
        let builder = self.client.request(&Operation::GetUser {
            id: last_segment(name),
        })?;
        Ok(User::from(self.client.send_json::<UserDto>(builder).await?))
    }

    pub async fn update_user(&self, name: &str, update: &UpdateUserRequest) -> Result<User> {
        let mut mask = Vec::new();
        if update.nickname.is_some() {
            mask.push("nickname");
        }
        if update.email.is_some() {
            mask.push("email");
        }
        if update.avatar_url.is_some() {
            mask.push("avatar_url");
        }
        if update.description.is_some() {
            mask.push("description");
        }
        if update.password.is_some() {
            mask.push("password");
        }
        let builder = self
            .client
            .request(&Operation::UpdateUser {
                id: last_segment(name),
            })?
            .query(&[("updateMask", mask.join(","))])
            .json(update);
        Ok(User::from(self.client.send_json::<UserDto>(builder).await?))
    }

    pub async fn get_user_stats(&self, name: &str) -> Result<UserStats> {
        let builder = self.client.request(&Operation::GetUserStats {
            id: last_segment(name),
        })?;
        Ok(UserStats::from(
            self.client.send_json::<UserStatsDto>(builder).await?,
        ))
    }

    // ─── Access tokens ─────────────────────────────────────────────────────

    pub async fn list_access_tokens(&self, user_name: &str) -> Result<Vec<UserAccessToken>> {
        let builder = self.client.request(&Operation::ListAccessTokens {
            user_id: last_segment(user_name),
        })?;
        let body: ListAccessTokensResponse = self.client.send_json(builder).await?;
        Ok(body
            .access_tokens
            .into_iter()
            .map(UserAccessToken::from)
            .collect())
    }

    pub async fn create_access_token(
        &self,
        user_name: &str,
        description: &str,
        expires_at: Option<&str>,
    ) -> Result<UserAccessToken> {
        let builder = self
            .client
            .request(&Operation::CreateAccessToken {
                user_id: last_segment(user_name),
            })?
            .json(&CreateAccessTokenRequest {
                description: description.to_string(),
                expires_at: expires_at.map(str::to_string),
            });
        Ok(UserAccessToken::from(
            self.client.send_json::<AccessTokenDto>(builder).await?,
        ))
    }

    pub async fn delete_access_token(&self, user_name: &str, token: &str) -> Result<()> {
        let builder = self.client.request(&Operation::DeleteAccessToken {
            user_id: last_segment(user_name),
            token,
        })?;
        self.client.send_unit(builder).await
    }

    // ─── Webhooks ──────────────────────────────────────────────────────────

    pub async fn list_webhooks(&self, user_name: &str) -> Result<Vec<Webhook>> {
        let builder = self.client.request(&Operation::ListWebhooks {
            user_id: last_segment(user_name),
        })?;
        let body: ListWebhooksResponse = self.client.send_json(builder).await?;
        Ok(body.webhooks.into_iter().map(Webhook::from).collect())
    }

    pub async fn create_webhook(&self, name: &str, url: &str) -> Result<Webhook> {
        let builder = self
            .client
            .request(&Operation::CreateWebhook)?
            .json(&CreateWebhookRequest {
                name: name.to_string(),
                url: url.to_string(),
            });
        Ok(Webhook::from(
            self.client.send_json::<WebhookDto>(builder).await?,
        ))
    }

    pub async fn update_webhook(&self, id: i32, name: &str, url: &str) -> Result<Webhook> {
        let builder = self
            .client
            .request(&Operation::UpdateWebhook { id })?
            .query(&[("updateMask", "name,url")])
            .json(&CreateWebhookRequest {
                name: name.to_string(),
                url: url.to_string(),
            });
        Ok(Webhook::from(
            self.client.send_json::<WebhookDto>(builder).await?,
        ))
    }

    pub async fn delete_webhook(&self, id: i32) -> Result<()> {
        let builder = self.client.request(&Operation::DeleteWebhook { id })?;
        self.client.send_unit(builder).await
    }
}
