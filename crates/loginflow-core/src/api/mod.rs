//! HTTP client module for the authentication service.
//!
//! This module provides the `LoginClient` for exchanging a username and
//! password with the remote `/login` endpoint, plus the `AuthError`
//! taxonomy used to classify failed attempts.

pub mod client;
pub mod error;

pub use client::{CredentialTransport, LoginClient, REQUEST_TIMEOUT_SECS};
pub use error::{AuthError, FailureKind};
