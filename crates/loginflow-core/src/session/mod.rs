//! Session storage for the active authentication token.
//!
//! This module provides:
//! - `SessionStore`: the narrow set/get/clear contract the login flow writes to
//! - `MemorySession`: process-lifetime storage
//! - `FileSession`: JSON file in the cache directory, restored at startup
//! - `KeyringSession`: OS keychain storage via keyring
//!
//! A store holds at most one token. Writing a new token replaces the old one.

pub mod file;
pub mod keychain;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use self::file::FileSession;
pub use self::keychain::KeyringSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String) -> Self {
        Self {
            token,
            username: None,
            created_at: Utc::now(),
        }
    }

    /// Session for a token issued to a known user
    pub fn for_user(token: String, username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            ..Self::new(token)
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.created_at).num_minutes().max(0)
    }
}

/// Holder of the current authentication token.
pub trait SessionStore {
    /// Replace the active session. Last write wins.
    fn set_session(&mut self, data: SessionData);

    /// Current session, if one has been established
    fn data(&self) -> Option<&SessionData>;

    /// Drop the active session (logout)
    fn clear(&mut self);

    /// Record the active token with no user attached.
    fn set_token(&mut self, token: String) {
        self.set_session(SessionData::new(token))
    }

    fn token(&self) -> Option<&str> {
        self.data().map(|d| d.token.as_str())
    }

    fn username(&self) -> Option<&str> {
        self.data().and_then(|d| d.username.as_deref())
    }

    fn is_authenticated(&self) -> bool {
        self.data().is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn set_session(&mut self, data: SessionData) {
        (**self).set_session(data)
    }

    fn data(&self) -> Option<&SessionData> {
        (**self).data()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

/// In-memory store. Starts empty and is gone when the process exits.
#[derive(Debug, Default)]
pub struct MemorySession {
    data: Option<SessionData>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn set_session(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    fn data(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    fn clear(&mut self) {
        self.data = None;
    }
}

/// Which session store backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    File,
    Keyring,
}

impl StoreKind {
    /// Open the store, restoring any previously persisted session.
    pub fn open(self, cache_dir: PathBuf) -> Result<Box<dyn SessionStore>> {
        Ok(match self {
            StoreKind::Memory => Box::new(MemorySession::new()),
            StoreKind::File => {
                let mut session = FileSession::new(cache_dir);
                session.load_or_discard();
                Box::new(session)
            }
            StoreKind::Keyring => Box::new(KeyringSession::open()?),
        })
    }
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "file" => Ok(StoreKind::File),
            "keyring" => Ok(StoreKind::Keyring),
            other => Err(anyhow::anyhow!(
                "Unknown session store '{}' (expected memory, file or keyring)",
                other
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreKind::Memory => "memory",
            StoreKind::File => "file",
            StoreKind::Keyring => "keyring",
        };
        f.write_str(name)
    }
}
