//! Application configuration management.
//!
//! Two layers:
//! - `Settings`: environment-supplied endpoint settings (base URL, credential
//!   transport, request timeout). The base URL is the only required value.
//! - `Config`: user preferences persisted at
//!   `~/.config/loginflow/config.json` (last username, preferred session store).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::{CredentialTransport, REQUEST_TIMEOUT_SECS};
use crate::session::StoreKind;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "loginflow";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Path appended to the base URL for the credential exchange
const LOGIN_PATH: &str = "login";

pub const ENV_BASE_URL: &str = "LOGINFLOW_API_BASE_URL";
pub const ENV_TRANSPORT: &str = "LOGINFLOW_CREDENTIAL_TRANSPORT";
pub const ENV_TIMEOUT_SECS: &str = "LOGINFLOW_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub transport: CredentialTransport,
    pub timeout_secs: u64,
}

impl Settings {
    /// Settings for a base URL with default transport and timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            transport: CredentialTransport::default(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        })
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("{} is not set", ENV_BASE_URL))?;
        let mut settings = Self::new(&base_url)?;

        if let Some(transport) = lookup(ENV_TRANSPORT) {
            settings.transport = transport
                .parse()
                .with_context(|| format!("Invalid {}", ENV_TRANSPORT))?;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: '{}'", ENV_TIMEOUT_SECS, timeout))?;
            if secs == 0 {
                anyhow::bail!("{} must be greater than zero", ENV_TIMEOUT_SECS);
            }
            settings.timeout_secs = secs;
        }

        Ok(settings)
    }

    pub fn with_transport(mut self, transport: CredentialTransport) -> Self {
        self.transport = transport;
        self
    }

    /// `<base>/login`, tolerating a trailing slash on the base
    pub fn login_endpoint(&self) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, LOGIN_PATH))
            .with_context(|| format!("Invalid login endpoint for base URL {}", self.base_url))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL: '{}'", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(anyhow::anyhow!(
            "Unsupported URL scheme '{}' in base URL (expected http or https)",
            scheme
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub last_username: Option<String>,
    #[serde(default)]
    pub session_store: StoreKind,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // -------------------------------------------------------------------------
    // Settings Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_endpoint_appends_path() {
        let settings = Settings::new("http://localhost:8080").unwrap();
        assert_eq!(settings.login_endpoint().unwrap().as_str(), "http://localhost:8080/login");
    }

    #[test]
    fn test_login_endpoint_keeps_base_path() {
        let settings = Settings::new("https://example.com/api/v1/").unwrap();
        assert_eq!(
            settings.login_endpoint().unwrap().as_str(),
            "https://example.com/api/v1/login"
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(Settings::new("ftp://example.com").is_err());
        assert!(Settings::new("not a url").is_err());
    }

    #[test]
    fn test_from_lookup_requires_base_url() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(ENV_BASE_URL));

        assert!(Settings::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).is_err());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let settings =
            Settings::from_lookup(lookup(&[(ENV_BASE_URL, "http://localhost:8080")])).unwrap();
        assert_eq!(settings.transport, CredentialTransport::Body);
        assert_eq!(settings.timeout_secs, REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_TRANSPORT, "both"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(settings.transport, CredentialTransport::Both);
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        assert!(Settings::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .is_err());
        assert!(Settings::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_TIMEOUT_SECS, "0"),
        ]))
        .is_err());
    }

    // -------------------------------------------------------------------------
    // Config File Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.last_username.is_none());
        assert_eq!(config.session_store, StoreKind::File);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            last_username: Some("alice".to_string()),
            session_store: StoreKind::Keyring,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.last_username.as_deref(), Some("alice"));
        assert_eq!(loaded.session_store, StoreKind::Keyring);
    }

    #[test]
    fn test_config_without_store_field_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"last_username":"bob"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.last_username.as_deref(), Some("bob"));
        assert_eq!(loaded.session_store, StoreKind::File);
    }
}
