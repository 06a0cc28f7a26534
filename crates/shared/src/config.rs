//! Configuration types for the Okta role manager

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{Result, RoleError};

/// Environment variable holding the Okta org domain
pub const ENV_OKTA_DOMAIN: &str = "OKTA_DOMAIN";
/// Environment variable holding the Okta API token
pub const ENV_OKTA_API_TOKEN: &str = "OKTA_API_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 200;

/// Connection settings for the Okta directory
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryConfig {
    /// Org domain, e.g. `dev-123456.okta.com`
    #[serde(default)]
    pub okta_domain: Option<String>,

    /// Full base URL. Takes precedence over `okta_domain` (used for proxies and tests).
    #[serde(default)]
    pub base_url: Option<String>,

    /// API token created in the Okta Admin portal
    #[serde(default)]
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `limit` query parameter sent on list requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            okta_domain: None,
            base_url: None,
            api_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("okta_domain", &self.okta_domain)
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl DirectoryConfig {
    /// Create a configuration for an org domain and API token
    pub fn new(okta_domain: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            okta_domain: Some(okta_domain.into()),
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from `OKTA_DOMAIN` and `OKTA_API_TOKEN`
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(domain) = lookup(ENV_OKTA_DOMAIN).filter(|v| !v.is_empty()) {
            self.okta_domain = Some(domain);
        }
        if let Some(token) = lookup(ENV_OKTA_API_TOKEN).filter(|v| !v.is_empty()) {
            self.api_token = token;
        }
        self
    }

    /// Base URL of the org, without a trailing slash
    pub fn org_url(&self) -> Result<String> {
        if let Some(url) = &self.base_url {
            return Ok(url.trim_end_matches('/').to_string());
        }

        match self.okta_domain.as_deref() {
            Some(domain) if !domain.is_empty() => {
                let domain = domain
                    .trim_start_matches("https://")
                    .trim_end_matches('/');
                Ok(format!("https://{}", domain))
            }
            _ => Err(RoleError::Config(
                "either 'oktaDomain' or 'baseUrl' must be set".to_string(),
            )),
        }
    }

    /// Check that the configuration can be used to build a client
    pub fn validate(&self) -> Result<()> {
        self.org_url()?;

        if self.api_token.is_empty() {
            return Err(RoleError::Config("'apiToken' must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(RoleError::Config("'pageSize' must be positive".to_string()));
        }
        Ok(())
    }
}

/// Logger interface for dependency injection
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>);
}

/// No-op logger for testing
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn info(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
}
