//! Sign-in, sign-out, and the session restore state machine.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use notewire_core::{Error, Result, User};

use crate::auth::extract_session_token;
use crate::dto::{
    GetCurrentUserResponse, SessionResponse, SignInRequestBody, SignInResponseV026, UserDto,
};
use crate::http::ApiClient;
use crate::session::{PersistedSession, Session, SessionStore};
use crate::version::{Operation, ServerVersion};

/// Authentication lifecycle phase.
///
/// `NoSession → Restoring → {Authenticated, Unauthenticated}` on process
/// start; sign-in and sign-out move between the two terminal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoSession,
    Restoring,
    Authenticated,
    Unauthenticated,
}

/// Owns the credential lifecycle: sign-in for all three revisions,
/// best-effort sign-out, and session restore.
pub struct AuthRepository {
    client: ApiClient,
    store: Arc<dyn SessionStore>,
    phase: watch::Sender<SessionPhase>,
    current_user: watch::Sender<Option<User>>,
}

impl AuthRepository {
    pub fn new(client: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        AuthRepository {
            client,
            store,
            phase: watch::Sender::new(SessionPhase::NoSession),
            current_user: watch::Sender::new(None),
        }
    }

    fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    pub fn watch_current_user(&self) -> watch::Receiver<Option<User>> {
        self.current_user.subscribe()
    }

    /// Sign in with username and password against the given server and
    /// revision. On success the credential and session fields are
    /// persisted and the phase becomes [`SessionPhase::Authenticated`].
    pub async fn sign_in(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
        version: ServerVersion,
    ) -> Result<User> {
        let session = self.session();
        session.set_server_url(Some(server_url));
        session.set_server_version(version);

        let (token, user_dto) = match version {
            ServerVersion::V024 => self.sign_in_v024(username, password).await?,
            ServerVersion::V025 => self.sign_in_v025(username, password).await?,
            ServerVersion::V026 => self.sign_in_v026(username, password).await?,
        };

        let user = User::from(user_dto);
        session.set_access_token(Some(token.clone()));
        self.persist(&token, user.id)?;
        self.current_user.send_replace(Some(user.clone()));
        self.phase.send_replace(SessionPhase::Authenticated);
        info!(
            server_version = version.as_tag(),
            user_id = user.id,
            "signed in"
        );
        Ok(user)
    }

    /// v0.24 takes the credentials as query parameters and answers with a
    /// bare user body plus a `memos.access-token` cookie.
    async fn sign_in_v024(&self, username: &str, password: &str) -> Result<(String, UserDto)> {
        let builder = self.client.request(&Operation::SignIn)?.query(&[
            ("passwordCredentials.username", username),
            ("passwordCredentials.password", password),
            ("neverExpire", "true"),
        ]);
        let response = self.client.send(builder).await?;
        let token = extract_session_token(ServerVersion::V024, response.headers())?;
        let user: UserDto = response.json().await.map_err(Error::from)?;
        Ok((token, user))
    }

    /// v0.25 creates a session resource and answers with a `user_session`
    /// cookie.
    async fn sign_in_v025(&self, username: &str, password: &str) -> Result<(String, UserDto)> {
        let builder = self
            .client
            .request(&Operation::SignIn)?
            .json(&SignInRequestBody::new(username, password));
        let response = self.client.send(builder).await?;
        let token = extract_session_token(ServerVersion::V025, response.headers())?;
        let body: SessionResponse = response.json().await.map_err(Error::from)?;
        let user = body
            .user
            .ok_or_else(|| Error::EmptyResponse("no user in sign-in response".to_string()))?;
        Ok((token, user))
    }

    /// v0.26 returns the access token in the response body.
    async fn sign_in_v026(&self, username: &str, password: &str) -> Result<(String, UserDto)> {
        let builder = self
            .client
            .request(&Operation::SignIn)?
            .json(&SignInRequestBody::new(username, password));
        let body: SignInResponseV026 = self.client.send_json(builder).await?;
        let token = body
            .access_token
            .ok_or_else(|| Error::EmptyResponse("no access token in sign-in response".to_string()))?;
        let user = body
            .user
            .ok_or_else(|| Error::EmptyResponse("no user in sign-in response".to_string()))?;
        Ok((token, user))
    }

    /// Sign in with a pre-issued access token. The token is validated by
    /// fetching the current user; on failure the in-memory credential is
    /// rolled back and nothing is persisted.
    pub async fn sign_in_with_access_token(
        &self,
        server_url: &str,
        access_token: &str,
        version: ServerVersion,
    ) -> Result<User> {
        let session = self.session();
        session.set_server_url(Some(server_url));
        session.set_server_version(version);

        // Strip a "Bearer " prefix if the user pasted one
        let token = access_token
            .trim()
            .strip_prefix("Bearer ")
            .unwrap_or(access_token.trim())
            .trim()
            .to_string();
        session.set_access_token(Some(token.clone()));

        match self.fetch_current_user().await {
            Ok(user) => {
                self.persist(&token, user.id)?;
                self.current_user.send_replace(Some(user.clone()));
                self.phase.send_replace(SessionPhase::Authenticated);
                Ok(user)
            }
            Err(e) => {
                session.clear();
                Err(e)
            }
        }
    }

    /// Sign out. The server-side call is fire-and-forget: local session
    /// state is cleared regardless of whether the remote call succeeds.
    pub async fn sign_out(&self) {
        match self.client.request(&Operation::SignOut) {
            Ok(builder) => {
                if let Err(e) = self.client.send_unit(builder).await {
                    warn!(error = %e, "sign-out call failed, clearing local session anyway");
                }
            }
            Err(e) => warn!(error = %e, "sign-out request not sent"),
        }
        self.session().clear();
        if let Err(e) = self.store.clear_credentials() {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.current_user.send_replace(None);
        self.phase.send_replace(SessionPhase::Unauthenticated);
        info!("signed out");
    }

    /// Restore a persisted session on process start.
    ///
    /// Only a definitive authentication rejection (401/403) erases the
    /// stored credential. Any other failure — transport error, 5xx,
    /// malformed response — enters `Authenticated` optimistically with the
    /// credential retained, so a transient outage never forces a re-login;
    /// the next authenticated call re-surfaces a 401 if the token is
    /// truly dead.
    pub async fn restore_session(&self) -> Result<bool> {
        let persisted = self.store.load()?;
        let (Some(url), Some(token)) = (persisted.server_url, persisted.access_token) else {
            self.phase.send_replace(SessionPhase::Unauthenticated);
            return Ok(false);
        };
        let version = ServerVersion::from_tag(persisted.server_version.as_deref());

        let session = self.session();
        session.set_server_url(Some(&url));
        session.set_access_token(Some(token));
        session.set_server_version(version);
        self.phase.send_replace(SessionPhase::Restoring);

        match self.fetch_current_user().await {
            Ok(user) => {
                self.current_user.send_replace(Some(user));
                self.phase.send_replace(SessionPhase::Authenticated);
                Ok(true)
            }
            Err(e) if e.is_auth_rejection() => {
                warn!(error = %e, "session restore rejected, clearing session");
                session.clear();
                if let Err(store_err) = self.store.clear_credentials() {
                    warn!(error = %store_err, "failed to clear persisted session");
                }
                self.phase.send_replace(SessionPhase::Unauthenticated);
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "session restore inconclusive, keeping credential");
                self.phase.send_replace(SessionPhase::Authenticated);
                Ok(true)
            }
        }
    }

    /// Fetch the current user through the version-appropriate endpoint and
    /// refresh the cached value.
    pub async fn get_current_user(&self) -> Result<User> {
        let user = self.fetch_current_user().await?;
        self.current_user.send_replace(Some(user.clone()));
        self.phase.send_replace(SessionPhase::Authenticated);
        Ok(user)
    }

    async fn fetch_current_user(&self) -> Result<User> {
        let builder = self.client.request(&Operation::GetCurrentUser)?;
        let dto = match self.session().server_version() {
            // v0.24 answers with a bare user object
            ServerVersion::V024 => self.client.send_json::<UserDto>(builder).await?,
            ServerVersion::V025 | ServerVersion::V026 => {
                let body: GetCurrentUserResponse = self.client.send_json(builder).await?;
                body.user
                    .ok_or_else(|| Error::EmptyResponse("no user in response".to_string()))?
            }
        };
        Ok(User::from(dto))
    }

    fn persist(&self, token: &str, user_id: i32) -> Result<()> {
        let session = self.session();
        self.store.save(&PersistedSession {
            server_url: session.server_url(),
            access_token: Some(token.to_string()),
            user_id,
            server_version: Some(session.server_version().as_tag().to_string()),
        })
    }
}
