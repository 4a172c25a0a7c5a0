//! HTTP client for the authentication endpoint.
//!
//! `LoginClient` performs the raw credential exchange: one `POST <base>/login`
//! per call, no retries, no caching. Interpreting the outcome for the rest of
//! the application is left to `auth::LoginFlow`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::Credentials;
use crate::config::Settings;

use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// Bounds the exchange so a hung server still produces a result.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// How credentials travel in the login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialTransport {
    /// JSON body only
    #[default]
    Body,
    /// `Authorization: Basic` header only
    Basic,
    /// Header and body together, for servers that expect both
    Both,
}

impl CredentialTransport {
    fn sends_body(self) -> bool {
        matches!(self, CredentialTransport::Body | CredentialTransport::Both)
    }

    fn sends_header(self) -> bool {
        matches!(self, CredentialTransport::Basic | CredentialTransport::Both)
    }
}

impl FromStr for CredentialTransport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(CredentialTransport::Body),
            "basic" => Ok(CredentialTransport::Basic),
            "both" => Ok(CredentialTransport::Both),
            other => Err(anyhow::anyhow!(
                "Unknown credential transport '{}' (expected body, basic or both)",
                other
            )),
        }
    }
}

impl fmt::Display for CredentialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialTransport::Body => "body",
            CredentialTransport::Basic => "basic",
            CredentialTransport::Both => "both",
        };
        f.write_str(name)
    }
}

/// Client for the login endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct LoginClient {
    client: Client,
    endpoint: Url,
    transport: CredentialTransport,
}

impl LoginClient {
    /// Create a client from resolved settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.login_endpoint()?,
            transport: settings.transport,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn transport(&self) -> CredentialTransport {
        self.transport
    }

    /// Exchange credentials for a session token.
    ///
    /// Blank credentials fail with `InvalidInput` before any request is built.
    /// A non-2xx status is `Rejected` and the body is never inspected for a
    /// token. Anything that keeps the exchange from completing, including a
    /// 2xx body without a usable `token`, is a transport failure.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        credentials.validate()?;

        debug!(
            endpoint = %self.endpoint,
            transport = %self.transport,
            username = %credentials.username(),
            "Sending login request"
        );

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json");

        if self.transport.sends_header() {
            request = request.basic_auth(credentials.username(), Some(credentials.password()));
        }

        if self.transport.sends_body() {
            request = request.json(&LoginRequest {
                username: credentials.username(),
                password: credentials.password(),
            });
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Logged for diagnosis only; a rejection body is never searched for a token
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body = %AuthError::truncate_body(&body), "Login endpoint rejected credentials");
            return Err(AuthError::Rejected { status });
        }

        let body = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            debug!(body = %AuthError::truncate_body(&body), "Unparseable login response");
            AuthError::MalformedResponse(e.to_string())
        })?;

        if parsed.token.is_empty() {
            return Err(AuthError::MalformedResponse("token is empty".to_string()));
        }

        debug!(%status, "Login endpoint accepted credentials");
        Ok(parsed.token)
    }
}
