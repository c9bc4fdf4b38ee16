//! Admin session lifecycle.
//!
//! The session is loaded once from its persisted file, replaced on login,
//! signup and token refresh, and wiped on logout or when the API answers 401.
//! Every change is written back to disk and announced on a broadcast channel.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Admin, AuthData},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    Refreshed,
    SignedOut,
    /// The API rejected the token. Sent once per session.
    Expired,
}

/// Persisted shape of the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub admin: Option<Admin>,
    pub token: Option<String>,
    #[serde(rename = "tokenExpTime")]
    pub token_exp_time: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
}

/// What a page may show about the signed-in admin; never carries tokens.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub admin: Option<Admin>,
    pub token_exp_time: Option<String>,
}

/// Bearer token plus the generation it was read under.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: Option<String>,
    pub generation: u64,
}

struct SessionInner {
    snapshot: SessionSnapshot,
    generation: u64,
}

pub struct SessionStore {
    inner: RwLock<SessionInner>,
    path: Option<PathBuf>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Load the session persisted at `path`. A missing or unreadable file
    /// starts signed out.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<SessionSnapshot>(&bytes) {
                Ok(snapshot) => normalize(snapshot),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
                    SessionSnapshot::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SessionSnapshot::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read session file");
                SessionSnapshot::default()
            }
        };

        tracing::debug!(
            path = %path.display(),
            authenticated = snapshot.is_authenticated,
            "session loaded"
        );
        Self::with_snapshot(snapshot, Some(path))
    }

    pub fn in_memory() -> Self {
        Self::with_snapshot(SessionSnapshot::default(), None)
    }

    fn with_snapshot(snapshot: SessionSnapshot, path: Option<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: RwLock::new(SessionInner {
                snapshot,
                generation: 0,
            }),
            path,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Store a fresh login or signup.
    pub fn set_auth(&self, data: AuthData) -> AppResult<()> {
        self.replace(data, SessionEvent::SignedIn)
    }

    /// Store tokens returned by the refresh endpoint.
    pub fn refresh(&self, data: AuthData) -> AppResult<()> {
        self.replace(data, SessionEvent::Refreshed)
    }

    fn replace(&self, data: AuthData, event: SessionEvent) -> AppResult<()> {
        let snapshot = {
            let mut inner = self.write();
            inner.snapshot = SessionSnapshot {
                admin: Some(data.admin),
                token: Some(data.token),
                token_exp_time: data.token_exp_time,
                refresh_token: data.refresh_token,
                is_authenticated: true,
            };
            inner.generation += 1;
            inner.snapshot.clone()
        };
        self.persist(&snapshot)?;
        let _ = self.events.send(event);
        Ok(())
    }

    /// Explicit logout.
    pub fn clear(&self) -> AppResult<()> {
        {
            let mut inner = self.write();
            inner.snapshot = SessionSnapshot::default();
            inner.generation += 1;
        }
        self.persist(&SessionSnapshot::default())?;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    /// Handle a 401 observed by a request issued under `generation`.
    ///
    /// Returns true for exactly one caller per session; later or concurrent
    /// 401s from the same session see a bumped generation and do nothing.
    pub fn expire(&self, generation: u64) -> bool {
        {
            let mut inner = self.write();
            if inner.generation != generation || !inner.snapshot.is_authenticated {
                return false;
            }
            inner.snapshot = SessionSnapshot::default();
            inner.generation += 1;
        }
        if let Err(err) = self.persist(&SessionSnapshot::default()) {
            tracing::warn!(error = %err, "failed to persist expired session");
        }
        let _ = self.events.send(SessionEvent::Expired);
        true
    }

    pub fn credentials(&self) -> Credentials {
        let inner = self.read();
        Credentials {
            token: inner.snapshot.token.clone(),
            generation: inner.generation,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().snapshot.is_authenticated
    }

    pub fn admin(&self) -> Option<Admin> {
        self.read().snapshot.admin.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().snapshot.refresh_token.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().snapshot.clone()
    }

    pub fn info(&self) -> SessionInfo {
        let inner = self.read();
        SessionInfo {
            authenticated: inner.snapshot.is_authenticated,
            admin: inner.snapshot.admin.clone(),
            token_exp_time: inner.snapshot.token_exp_time.clone(),
        }
    }

    fn persist(&self, snapshot: &SessionSnapshot) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|err| AppError::Session(format!("encode session: {err}")))?;
        // Readers only ever see a complete file.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|err| AppError::Session(format!("write {}: {err}", path.display())))?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// A persisted flag without a token cannot authenticate anything.
fn normalize(mut snapshot: SessionSnapshot) -> SessionSnapshot {
    if snapshot.token.as_deref().is_none_or(str::is_empty) {
        snapshot = SessionSnapshot::default();
    } else {
        snapshot.is_authenticated = true;
    }
    snapshot
}
