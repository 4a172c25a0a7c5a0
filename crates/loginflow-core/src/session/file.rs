use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::{SessionData, SessionStore};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Session persisted as JSON in the cache directory.
pub struct FileSession {
    cache_dir: PathBuf,
    data: Option<SessionData>,
}

impl FileSession {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let data: SessionData = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    /// Load session from disk, discarding a file that cannot be read.
    /// Returns whether a session was restored.
    pub fn load_or_discard(&mut self) -> bool {
        match self.load() {
            Ok(restored) => restored,
            Err(e) => {
                warn!(error = %e, path = ?self.session_path(), "Discarding unreadable session file");
                self.clear();
                false
            }
        }
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    fn remove_file(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

impl SessionStore for FileSession {
    /// The in-memory session is set even if writing the file fails.
    fn set_session(&mut self, data: SessionData) {
        self.data = Some(data);
        match self.save() {
            Ok(()) => debug!(path = ?self.session_path(), "Session saved"),
            Err(e) => warn!(error = %e, "Failed to save session"),
        }
    }

    fn data(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    fn clear(&mut self) {
        self.data = None;
        if let Err(e) = self.remove_file() {
            warn!(error = %e, "Failed to remove session file");
        }
    }
}
