//! The login flow: one credential exchange, then session and navigation.

use tracing::{debug, error, info, warn};

use crate::api::{AuthError, FailureKind, LoginClient};
use crate::session::{SessionData, SessionStore};

use super::Credentials;

/// Outcome of one submission attempt.
#[derive(Debug)]
pub enum AuthResult {
    Success { token: String },
    Failure(AuthError),
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthResult::Success { token } => Some(token),
            AuthResult::Failure(_) => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            AuthResult::Success { .. } => None,
            AuthResult::Failure(e) => Some(e.kind()),
        }
    }
}

impl From<Result<String, AuthError>> for AuthResult {
    fn from(result: Result<String, AuthError>) -> Self {
        match result {
            Ok(token) => AuthResult::Success { token },
            Err(e) => AuthResult::Failure(e),
        }
    }
}

/// Signal that the caller should move to the authenticated view.
pub trait Navigator {
    fn on_authenticated(&mut self);
}

impl<F: FnMut()> Navigator for F {
    fn on_authenticated(&mut self) {
        self()
    }
}

/// Ties a `LoginClient` to the session store and navigator it reports to.
///
/// On success the token, tagged with the username that earned it, is written
/// to the store and only then is the navigator signalled, once. On any failure neither is touched.
pub struct LoginFlow<S, N> {
    client: LoginClient,
    store: S,
    navigator: N,
}

impl<S: SessionStore, N: Navigator> LoginFlow<S, N> {
    pub fn new(client: LoginClient, store: S, navigator: N) -> Self {
        Self {
            client,
            store,
            navigator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_parts(self) -> (S, N) {
        (self.store, self.navigator)
    }

    /// Submit credentials and propagate a successful token.
    pub async fn submit(&mut self, credentials: &Credentials) -> AuthResult {
        let result: AuthResult = self.client.authenticate(credentials).await.into();

        match &result {
            AuthResult::Success { token } => {
                self.store
                    .set_session(SessionData::for_user(token.clone(), credentials.username()));
                self.navigator.on_authenticated();
                info!(username = %credentials.username(), "Login successful");
            }
            AuthResult::Failure(e) => match e.kind() {
                FailureKind::InvalidInput => {
                    debug!(error = %e, "Login not attempted");
                }
                FailureKind::Rejected => {
                    warn!(username = %credentials.username(), error = %e, "Login rejected");
                }
                FailureKind::TransportError => {
                    error!(
                        endpoint = %self.client.endpoint(),
                        error = ?e,
                        "Login failed"
                    );
                }
            },
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_auth_result_from_ok() {
        let result: AuthResult = Ok("abc123".to_string()).into();
        assert!(result.is_success());
        assert_eq!(result.token(), Some("abc123"));
        assert!(result.failure_kind().is_none());
    }

    #[test]
    fn test_auth_result_from_err() {
        let result: AuthResult = Err(AuthError::Rejected {
            status: StatusCode::UNAUTHORIZED,
        })
        .into();
        assert!(!result.is_success());
        assert!(result.token().is_none());
        assert_eq!(result.failure_kind(), Some(FailureKind::Rejected));
    }

    #[test]
    fn test_closure_navigator() {
        let mut count = 0;
        {
            let mut nav = || count += 1;
            nav.on_authenticated();
            nav.on_authenticated();
        }
        assert_eq!(count, 2);
    }
}
