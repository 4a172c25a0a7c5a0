use anyhow::{Context, Result};
use keyring::Entry;
use tracing::{debug, warn};

use super::{SessionData, SessionStore};

const SERVICE_NAME: &str = "loginflow";

/// Keychain account the session is stored under
const ACCOUNT_NAME: &str = "session";

/// Session kept in the OS keychain as a JSON blob.
pub struct KeyringSession {
    entry: Entry,
    data: Option<SessionData>,
}

impl KeyringSession {
    /// Open the keychain entry and restore a stored session if present
    pub fn open() -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, ACCOUNT_NAME)
            .context("Failed to create keyring entry")?;

        let data = match entry.get_password() {
            Ok(blob) => match serde_json::from_str::<SessionData>(&blob) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session in keychain");
                    if let Err(e) = entry.delete_credential() {
                        warn!(error = %e, "Failed to delete session from keychain");
                    }
                    None
                }
            },
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                return Err(e).context("Failed to retrieve session from keychain");
            }
        };

        Ok(Self { entry, data })
    }

    fn store(&self, data: &SessionData) -> Result<()> {
        let blob = serde_json::to_string(data)?;
        self.entry
            .set_password(&blob)
            .context("Failed to store session in keychain")
    }
}

impl SessionStore for KeyringSession {
    fn set_session(&mut self, data: SessionData) {
        match self.store(&data) {
            Ok(()) => debug!("Session stored in keychain"),
            Err(e) => warn!(error = %e, "Failed to store session in keychain"),
        }
        self.data = Some(data);
    }

    fn data(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    fn clear(&mut self) {
        self.data = None;
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => warn!(error = %e, "Failed to delete session from keychain"),
        }
    }
}
