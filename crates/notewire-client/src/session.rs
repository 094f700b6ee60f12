//! Observable session state and persisted-session storage.
//!
//! The current access token, server URL, and server version live in
//! single-writer watch cells: writes happen only on explicit user actions
//! (sign-in, sign-out, version change) or from the restore state machine,
//! while any in-flight request-building code reads the latest fully
//! written value. [`SessionStore`] is the persistence seam; the on-disk
//! format is one small JSON object.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use notewire_core::{Error, Result};

use crate::version::ServerVersion;

/// Normalize a user-entered server URL: trim trailing slashes and prefix
/// `https://` when no scheme is given. Blank input normalizes to `None`.
pub fn normalize_server_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

/// The session fields persisted across restarts. Plain key-value data;
/// the only schema versioning is the server version tag itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    pub server_url: Option<String>,
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_id: i32,
    pub server_version: Option<String>,
}

/// Persistence seam for the session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<PersistedSession>;
    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Erase the credential and user id but keep the server URL and
    /// version tag for sign-in pre-fill.
    fn clear_credentials(&self) -> Result<()> {
        let current = self.load()?;
        self.save(&PersistedSession {
            server_url: current.server_url,
            access_token: None,
            user_id: 0,
            server_version: current.server_version,
        })
    }
}

/// JSON-file-backed session store.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<PersistedSession> {
        if !self.path.exists() {
            return Ok(PersistedSession::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Store(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Store(format!("parse {}: {e}", self.path.display())))
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("create {}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| Error::Store(format!("serialize session: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| Error::Store(format!("write {}: {e}", self.path.display())))
    }
}

/// In-memory session store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<PersistedSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: PersistedSession) -> Self {
        MemorySessionStore {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<PersistedSession> {
        Ok(self.inner.lock().expect("session store poisoned").clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.inner.lock().expect("session store poisoned") = session.clone();
        Ok(())
    }
}

struct SessionInner {
    access_token: watch::Sender<Option<String>>,
    server_url: watch::Sender<Option<String>>,
    server_version: watch::Sender<ServerVersion>,
}

/// The live, observable session: token, normalized server URL, and server
/// version. Cheap to clone; all clones share the same cells.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            inner: Arc::new(SessionInner {
                access_token: watch::Sender::new(None),
                server_url: watch::Sender::new(None),
                server_version: watch::Sender::new(ServerVersion::V026),
            }),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.access_token.borrow().clone()
    }

    pub fn set_access_token(&self, token: Option<String>) {
        self.inner.access_token.send_replace(token);
    }

    pub fn server_url(&self) -> Option<String> {
        self.inner.server_url.borrow().clone()
    }

    /// Set the server URL, normalizing it first.
    pub fn set_server_url(&self, url: Option<&str>) {
        self.inner
            .server_url
            .send_replace(url.and_then(normalize_server_url));
    }

    pub fn server_version(&self) -> ServerVersion {
        *self.inner.server_version.borrow()
    }

    pub fn set_server_version(&self, version: ServerVersion) {
        self.inner.server_version.send_replace(version);
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.access_token.borrow().is_some()
    }

    /// Drop the in-memory credential. Server URL and version stay.
    pub fn clear(&self) {
        self.inner.access_token.send_replace(None);
    }

    /// Subscribe to access-token changes.
    pub fn watch_access_token(&self) -> watch::Receiver<Option<String>> {
        self.inner.access_token.subscribe()
    }

    /// Subscribe to server-version changes.
    pub fn watch_server_version(&self) -> watch::Receiver<ServerVersion> {
        self.inner.server_version.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
