use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::Context;

use crate::errors::AppError;
use crate::models::{Session, User};

/// Durable on-device storage for the signed-in session.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<Session>>;
    fn save(&self, session: &Session) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Stores the session as JSON in a single file.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> anyhow::Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let session = serde_json::from_str(&raw).context("failed to parse stored session")?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Process-local storage; nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStorage {
    session: Mutex<Option<Session>>,
}

impl MemoryTokenStorage {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> anyhow::Result<Option<Session>> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The authenticated user and token currently held by the client.
pub struct SessionStore {
    current: Mutex<Option<Session>>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            current: Mutex::new(None),
            storage,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the persisted session. Unreadable storage leaves the store signed out.
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.storage.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore session, starting signed out");
                None
            }
        };
        *self.slot() = restored.clone();
        restored
    }

    pub fn current(&self) -> Option<Session> {
        self.slot().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.slot().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.slot().as_ref().map(|s| s.token.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.slot().is_some()
    }

    pub fn establish(&self, session: Session) -> Result<(), AppError> {
        self.storage
            .save(&session)
            .map_err(|e| AppError::Storage(format!("{e:#}")))?;
        tracing::info!(user_id = %session.user.id, "session established");
        *self.slot() = Some(session);
        Ok(())
    }

    pub fn update_user(&self, user: User) -> Result<Session, AppError> {
        let mut slot = self.slot();
        let session = slot.as_mut().ok_or(AppError::NotSignedIn)?;
        let updated = Session {
            user,
            token: session.token.clone(),
        };
        self.storage
            .save(&updated)
            .map_err(|e| AppError::Storage(format!("{e:#}")))?;
        *session = updated.clone();
        Ok(updated)
    }

    /// Drops the session. Returns `true` only for the call that actually signed out.
    pub fn clear(&self) -> bool {
        let previous = self.slot().take();
        if previous.is_none() {
            return false;
        }
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        true
    }
}
