use std::fmt;

use crate::api::AuthError;

/// A username/password pair for one submission attempt.
///
/// The password never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Only used when building the outbound request. Never log this.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Reject empty fields before anything goes over the wire.
    /// A blank username is empty; a password is taken as typed.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::InvalidInput("username is empty"));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidInput("password is empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
