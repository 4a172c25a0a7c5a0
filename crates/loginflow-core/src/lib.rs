//! loginflow core - credential submission and session establishment.
//!
//! A `LoginFlow` sends one username/password exchange to a configured
//! authentication endpoint. A successful exchange stores the returned token
//! in a `SessionStore` and then signals a `Navigator`. A failed one comes back
//! as a typed `AuthResult::Failure` and leaves the session untouched.

pub mod api;
pub mod auth;
pub mod config;
pub mod session;

pub use api::{AuthError, CredentialTransport, FailureKind, LoginClient};
pub use auth::{AuthResult, Credentials, LoginFlow, Navigator};
pub use config::{Config, Settings};
pub use session::{FileSession, KeyringSession, MemorySession, SessionData, SessionStore, StoreKind};
