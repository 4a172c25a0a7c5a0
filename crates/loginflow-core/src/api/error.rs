use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a failed login attempt.
///
/// Every failure maps to a user-visible "login failed" signal, but the kinds
/// stay distinct so logs and callers can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    Rejected,
    TransportError,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("authentication rejected (status {status})")]
    Rejected { status: StatusCode },

    #[error("network or transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("network or transport error: malformed response: {0}")]
    MalformedResponse(String),
}

/// Maximum length for response bodies echoed into logs
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl AuthError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AuthError::InvalidInput(_) => FailureKind::InvalidInput,
            AuthError::Rejected { .. } => FailureKind::Rejected,
            AuthError::Transport(_) | AuthError::MalformedResponse(_) => {
                FailureKind::TransportError
            }
        }
    }

    /// Short reason string carried by a failed `AuthResult`
    pub fn reason(&self) -> &'static str {
        match self.kind() {
            FailureKind::InvalidInput => "invalid input",
            FailureKind::Rejected => "authentication rejected",
            FailureKind::TransportError => "network or transport error",
        }
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::InvalidInput => "Username and password required",
            FailureKind::Rejected => "Invalid username or password",
            FailureKind::TransportError => "Unable to reach the authentication server",
        }
    }

    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            AuthError::InvalidInput("empty username").kind(),
            FailureKind::InvalidInput
        );
        assert_eq!(
            AuthError::Rejected { status: StatusCode::UNAUTHORIZED }.kind(),
            FailureKind::Rejected
        );
        assert_eq!(
            AuthError::MalformedResponse("missing token".into()).kind(),
            FailureKind::TransportError
        );
    }

    #[test]
    fn test_reason_strings() {
        let rejected = AuthError::Rejected { status: StatusCode::FORBIDDEN };
        assert_eq!(rejected.reason(), "authentication rejected");
        assert_eq!(
            AuthError::MalformedResponse(String::new()).reason(),
            "network or transport error"
        );
    }

    #[test]
    fn test_display_includes_status() {
        let err = AuthError::Rejected { status: StatusCode::UNAUTHORIZED };
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_user_message_distinguishes_rejection_from_transport() {
        let rejected = AuthError::Rejected { status: StatusCode::UNAUTHORIZED };
        let malformed = AuthError::MalformedResponse("not json".into());
        assert_ne!(rejected.user_message(), malformed.user_message());
    }

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(AuthError::truncate_body("nope"), "nope");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = AuthError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.contains("truncated, 520 total bytes"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        // 'é' is two bytes, so byte 500 falls mid-character
        let body = format!("a{}", "é".repeat(300));
        let truncated = AuthError::truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }
}
