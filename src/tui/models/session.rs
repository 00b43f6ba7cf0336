//! # Session
//!
//! The session flag gating access to the listing. Presence, not validity,
//! is what counts. The flag lives in a small file on disk ([`SessionStore`])
//! and is mirrored in an explicit [`Session`] context that the application
//! passes to the router instead of reading storage ambiently.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed storage for the session token
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing or blank file means no session.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read session file {}", self.path.display())),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create session directory {}", parent.display())
                })?;
            }
        }
        fs::write(&self.path, token)
            .with_context(|| format!("failed to write session file {}", self.path.display()))
    }

    /// Remove the stored token. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove session file {}", self.path.display())),
        }
    }
}

/// In-memory session context
#[derive(Debug, Clone)]
pub struct Session {
    store: SessionStore,
    token: Option<String>,
}

impl Session {
    /// Load the session from its store
    pub fn init(store: SessionStore) -> Result<Self> {
        let token = store.load()?;
        tracing::debug!(
            "Session initialized from {} (present: {})",
            store.path().display(),
            token.is_some()
        );
        Ok(Self { store, token })
    }

    pub fn is_present(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Persist a new token and mark the session present
    pub fn sign_in(&mut self, token: String) -> Result<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        tracing::info!("Session signed in");
        Ok(())
    }

    /// Clear the flag in memory and in storage
    ///
    /// The in-memory flag is dropped even when the store cannot be cleared,
    /// so the gate closes for the running process either way.
    pub fn teardown(&mut self) -> Result<()> {
        self.token = None;
        tracing::info!("Session torn down");
        self.store.clear()
    }
}
