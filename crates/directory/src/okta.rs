//! OktaClient - Okta Management API implementation of [`DirectoryClient`]

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{DirectoryConfig, Result, RoleError};
use std::time::Duration;
use tracing::{debug, trace};

use crate::client::DirectoryClient;
use crate::model::{GroupRecord, UserRecord};

/// Error body returned by the Okta API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OktaErrorBody {
    error_code: Option<String>,
    error_summary: Option<String>,
}

/// Client for the Okta users and groups endpoints
#[derive(Debug, Clone)]
pub struct OktaClient {
    http: Client,
    base_url: Url,
    page_size: u32,
}

impl OktaClient {
    /// Build a client from configuration
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.org_url()?)
            .map_err(|e| RoleError::Config(format!("invalid Okta URL: {}", e)))?;

        let mut token = HeaderValue::from_str(&format!("SSWS {}", config.api_token))
            .map_err(|_| RoleError::Config("API token contains invalid characters".to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RoleError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    /// Build the URL of an API path below `/api/v1`
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RoleError::Config("Okta URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    /// GET every page of a list endpoint, following `rel="next"` links
    async fn get_all<T: DeserializeOwned>(&self, mut url: Url, query: &[(&str, &str)]) -> Result<Vec<T>> {
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("limit", &self.page_size.to_string());
        }

        let mut items = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next.take() {
            debug!(url = %url, "Okta request");

            let response = self.http.get(url).send().await.map_err(upstream)?;
            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            next = next_link(response.headers());
            let page: Vec<T> = response.json().await.map_err(upstream)?;
            trace!(count = page.len(), has_next = next.is_some(), "Okta page received");
            items.extend(page);
        }

        Ok(items)
    }
}

#[async_trait]
impl DirectoryClient for OktaClient {
    async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>> {
        let search = format!("profile.login eq \"{}\"", escape_filter(login));
        self.get_all(self.endpoint(&["users"])?, &[("search", search.as_str())]).await
    }

    async fn find_groups_by_name(&self, name: &str) -> Result<Vec<GroupRecord>> {
        let search = format!("profile.name eq \"{}\"", escape_filter(name));
        self.get_all(self.endpoint(&["groups"])?, &[("search", search.as_str())]).await
    }

    async fn list_user_groups(&self, user_id: &str) -> Result<Vec<GroupRecord>> {
        self.get_all(self.endpoint(&["users", user_id, "groups"])?, &[]).await
    }

    async fn list_group_users(&self, group_id: &str) -> Result<Vec<UserRecord>> {
        self.get_all(self.endpoint(&["groups", group_id, "users"])?, &[]).await
    }
}

fn upstream(err: reqwest::Error) -> RoleError {
    RoleError::Upstream(err.to_string())
}

async fn error_from_response(response: Response) -> RoleError {
    let status = response.status();
    let body = response.json::<OktaErrorBody>().await.ok();

    match body {
        Some(OktaErrorBody {
            error_code: Some(code),
            error_summary: Some(summary),
        }) => RoleError::Upstream(format!("{} ({}): {}", status, code, summary)),
        Some(OktaErrorBody {
            error_summary: Some(summary),
            ..
        }) => RoleError::Upstream(format!("{}: {}", status, summary)),
        _ => RoleError::Upstream(status.to_string()),
    }
}

/// Escape a value for use inside a quoted Okta search expression
fn escape_filter(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Extract the `rel="next"` target from the response's `Link` headers
fn next_link(headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|link| {
            let mut parts = link.split(';');
            let target = parts.next()?.trim();
            let is_next = parts.any(|p| {
                let p = p.trim();
                p == "rel=\"next\"" || p == "rel=next"
            });
            if !is_next {
                return None;
            }
            let target = target.strip_prefix('<')?.strip_suffix('>')?;
            Url::parse(target).ok()
        })
}
