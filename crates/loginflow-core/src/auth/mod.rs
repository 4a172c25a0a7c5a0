//! Authentication module for submitting credentials.
//!
//! This module provides:
//! - `Credentials`: a username/password pair with redacted `Debug`
//! - `LoginFlow`: runs one exchange and propagates the token
//! - `AuthResult`, `Navigator`: the outcome and the post-login signal

pub mod credentials;
pub mod flow;

pub use credentials::Credentials;
pub use flow::{AuthResult, LoginFlow, Navigator};
