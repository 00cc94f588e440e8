use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use validator::Validate;

pub const DEFAULT_SESSION_FILE: &str = ".cf_dashboard_session.json";
pub const SESSION_KEY: &str = "cf_handle";

pub static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("broken session file: {0}")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid handle `{0}`")]
    InvalidHandle(String),
}

#[derive(Debug, Validate)]
struct HandleInput {
    #[validate(length(min = 3, max = 24), regex = "HANDLE_PATTERN")]
    handle: String,
}

/// Trim and validate a handle entered by the user.
pub fn normalize_handle(handle: &str) -> Result<String, SessionError> {
    let input = HandleInput {
        handle: handle.trim().to_string(),
    };
    match input.validate() {
        Ok(()) => Ok(input.handle),
        Err(_) => Err(SessionError::InvalidHandle(input.handle)),
    }
}

/// Remembered login state, owned by the application root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    handle: Option<String>,
}

impl Session {
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.handle.is_some()
    }
}

/// JSON file holding the session entries. Keys other than the handle are left untouched.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(SessionError::IoError(e)),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let content = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    pub async fn load(&self) -> Result<Session, SessionError> {
        let entries = self.read_entries().await?;
        let handle = entries.get(SESSION_KEY).cloned();
        if let Some(handle) = &handle {
            tracing::debug!("Restored session of {}", handle);
        }
        Ok(Session { handle })
    }

    pub async fn remember(&self, session: &mut Session, handle: &str) -> Result<(), SessionError> {
        let handle = normalize_handle(handle)?;

        let mut entries = self.read_entries().await?;
        entries.insert(SESSION_KEY.to_string(), handle.clone());
        self.write_entries(&entries).await?;

        tracing::info!("Logged in as {}", handle);
        session.handle = Some(handle);
        Ok(())
    }

    pub async fn clear(&self, session: &mut Session) -> Result<(), SessionError> {
        let mut entries = self.read_entries().await?;
        if entries.remove(SESSION_KEY).is_some() {
            self.write_entries(&entries).await?;
        }

        tracing::info!("Logged out");
        session.handle = None;
        Ok(())
    }
}
