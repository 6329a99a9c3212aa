//! GitHub REST API integration.
//!
//! The version tool needs exactly one read-only call: listing a repository's
//! tags to find the most recent one. The client is a thin authenticated
//! reqwest wrapper; API and transport failures are hard errors (no retry —
//! the surrounding CI job re-run is the retry mechanism).

use std::sync::OnceLock;

use reqwest::header;
use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, GitHubError, Result};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// One-time initialization guard for the rustls crypto provider.
///
/// Ensures install_default() is called exactly once per process even when
/// multiple clients are constructed.
static RUSTLS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// A repository tag as returned by `GET /repos/{owner}/{repo}/tags`.
///
/// The endpoint returns more fields (commit, tarball URLs); only the name is
/// consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    /// Tag name, e.g. `1.2.3` or `v1.2.3`
    pub name: String,
}

/// Authenticated GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client authenticated with the given token.
    pub fn with_token(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    /// Create a client against a non-default API base (used by tests).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        // An unset secret expands to an empty string in workflow env blocks;
        // catch it here rather than letting the API answer 401.
        if token.is_empty() {
            return Err(ConfigError::MissingInput {
                key: "GITHUB_TOKEN".to_string(),
            }
            .into());
        }

        RUSTLS_INITIALIZED.get_or_init(|| {
            // A second install attempt means another provider won; either way
            // a provider is in place, so the error can be ignored.
            let _ = rustls::crypto::ring::default_provider().install_default();
        });

        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid API base URL '{base_url}': {e}"))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("release-actions"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(API_VERSION),
        );
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| anyhow::anyhow!("invalid GITHUB_TOKEN: {e}"))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GitHubError::Request)?;

        Ok(Self { http, base_url })
    }

    /// List a repository's tags, most recent first.
    pub async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<Tag>> {
        let url = self
            .base_url
            .join(&format!("repos/{owner}/{repo}/tags"))
            .map_err(|e| anyhow::anyhow!("invalid repository path '{owner}/{repo}': {e}"))?;

        log::debug!("GET {url}");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(GitHubError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Api {
                status,
                url: url.to_string(),
            }
            .into());
        }

        Ok(response
            .json::<Vec<Tag>>()
            .await
            .map_err(GitHubError::Request)?)
    }
}
