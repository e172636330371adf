use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::format::{format_file_size, format_publish_date};
use crate::i18n::Language;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const REASON_SNIPPET_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: String,
    pub size: u64,
}

impl ReleaseAsset {
    #[must_use]
    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// The latest published release, as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub id: u64,
    pub tag: String,
    pub name: String,
    pub notes: String,
    pub html_url: String,
    pub published_at: DateTime<Utc>,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    #[must_use]
    pub fn published_on(&self, language: Language) -> String {
        format_publish_date(&self.published_at, language)
    }

    #[must_use]
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

#[derive(Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
    size: u64,
}

#[derive(Deserialize)]
struct GitHubRelease {
    #[serde(default)]
    id: u64,
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    html_url: String,
    published_at: DateTime<Utc>,
    assets: Vec<GitHubAsset>,
}

impl From<GitHubRelease> for ReleaseInfo {
    fn from(release: GitHubRelease) -> Self {
        let name = release
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| release.tag_name.clone());

        Self {
            id: release.id,
            tag: release.tag_name,
            name,
            notes: release.body.unwrap_or_default(),
            html_url: release.html_url,
            published_at: release.published_at,
            assets: release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    download_url: asset.browser_download_url,
                    size: asset.size,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct RegistryErrorBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("could not reach the release registry: {0}")]
    Network(#[source] reqwest::Error),
    #[error("release registry responded with HTTP {}: {reason}", .status.as_u16())]
    Fetch {
        status: reqwest::StatusCode,
        reason: String,
    },
    #[error("release registry response is malformed: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Anything that can report the latest release of a repository.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_latest(&self, owner: &str, repo: &str) -> Result<ReleaseInfo, ReleaseError>;
}

/// Client for a GitHub-style `releases/latest` endpoint.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    http: reqwest::Client,
    api_base: String,
}

impl ReleaseClient {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_api_base(http, DEFAULT_API_BASE)
    }

    #[must_use]
    pub fn with_api_base(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { http, api_base }
    }

    #[must_use]
    pub fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/releases/latest", self.api_base)
    }
}

#[async_trait]
impl ReleaseSource for ReleaseClient {
    async fn fetch_latest(&self, owner: &str, repo: &str) -> Result<ReleaseInfo, ReleaseError> {
        let url = self.latest_release_url(owner, repo);
        log::debug!("Fetching latest release from {url}");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, "quillpost")
            .send()
            .await
            .map_err(ReleaseError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReleaseError::Fetch {
                status,
                reason: failure_reason(status, &body),
            });
        }

        let bytes = response.bytes().await.map_err(ReleaseError::Network)?;
        let release: GitHubRelease =
            serde_json::from_slice(&bytes).map_err(ReleaseError::MalformedResponse)?;

        Ok(release.into())
    }
}

fn failure_reason(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<RegistryErrorBody>(body)
        && !error.message.trim().is_empty()
    {
        return error.message;
    }

    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }

    let snippet: String = body.chars().take(REASON_SNIPPET_CHARS).collect();
    if snippet.trim().is_empty() {
        "unknown error".to_string()
    } else {
        snippet
    }
}
