//! GitHub releases REST API client

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{ExistingRelease, ReleaseAsset, ReleaseHandle, ReleaseRequest, ReleaseSummary};
use crate::artifact::Artifact;
use crate::error::{ApiErrorDetail, GitHubError, InputError, Result};
use crate::inputs::Repository;
use bytes::Bytes;

/// Page size for list calls
const PER_PAGE: &str = "100";

/// Release operations on a single repository
#[allow(async_fn_in_trait)]
pub trait Releases {
    /// Published release for `tag`; fails with a 404 status when there is none
    async fn get_by_tag(&self, tag: &str) -> Result<ExistingRelease>;

    /// Releases of the repository, drafts included, in API order
    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>>;

    /// Create a release
    async fn create(&self, request: &ReleaseRequest) -> Result<ReleaseHandle>;

    /// Update release `id`
    async fn update(&self, id: u64, request: &ReleaseRequest) -> Result<ReleaseHandle>;

    /// Assets attached to release `release_id`
    async fn list_artifacts(&self, release_id: u64) -> Result<Vec<ReleaseAsset>>;

    /// Delete asset `asset_id`
    async fn delete_artifact(&self, asset_id: u64) -> Result<()>;

    /// Upload `content` as `artifact` to the release behind `upload_url`
    async fn upload_artifact(
        &self,
        upload_url: &str,
        artifact: &Artifact,
        content: Bytes,
    ) -> Result<()>;
}

/// Error body returned by the API
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// [`Releases`] over the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: reqwest::Client,
    api_url: Url,
    repository: Repository,
}

impl GitHubReleases {
    /// Create a client for `repository` authenticated with `token`
    pub fn new(token: &str, api_url: Url, repository: Repository) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| InputError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(AUTHORIZATION, auth);
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(GitHubError::from)?;

        Ok(Self {
            client,
            api_url,
            repository,
        })
    }

    /// `{api}/repos/{owner}/{repo}/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl {
                url: self.api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend([
                "repos",
                self.repository.owner.as_str(),
                self.repository.repo.as_str(),
            ])
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode its JSON response
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await.map_err(GitHubError::from)?)
    }

    /// Send a request, turning non-success statuses into [`GitHubError::Api`]
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build().map_err(GitHubError::from)?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        log::debug!("{} {}", method, url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(GitHubError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
        log::debug!("{} {} returned {}: {}", method, url, status, text);

        Err(GitHubError::Api {
            method,
            url,
            status: status.as_u16(),
            message: body
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            errors: body
                .errors
                .into_iter()
                .map(|e| serde_json::from_value(e).unwrap_or_default())
                .collect::<Vec<ApiErrorDetail>>(),
        }
        .into())
    }
}

impl Releases for GitHubReleases {
    async fn get_by_tag(&self, tag: &str) -> Result<ExistingRelease> {
        let url = self.endpoint(&["releases", "tags", tag])?;
        self.send_json(self.client.get(url)).await
    }

    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>> {
        let url = self.endpoint(&["releases"])?;
        self.send_json(self.client.get(url).query(&[("per_page", PER_PAGE)]))
            .await
    }

    async fn create(&self, request: &ReleaseRequest) -> Result<ReleaseHandle> {
        let url = self.endpoint(&["releases"])?;
        log::info!("Creating release for tag {}", request.tag);
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn update(&self, id: u64, request: &ReleaseRequest) -> Result<ReleaseHandle> {
        let url = self.endpoint(&["releases", &id.to_string()])?;
        log::info!("Updating release {} for tag {}", id, request.tag);
        self.send_json(self.client.request(Method::PATCH, url).json(request))
            .await
    }

    async fn list_artifacts(&self, release_id: u64) -> Result<Vec<ReleaseAsset>> {
        let url = self.endpoint(&["releases", &release_id.to_string(), "assets"])?;
        self.send_json(self.client.get(url).query(&[("per_page", PER_PAGE)]))
            .await
    }

    async fn delete_artifact(&self, asset_id: u64) -> Result<()> {
        let url = self.endpoint(&["releases", "assets", &asset_id.to_string()])?;
        log::info!("Deleting existing asset {}", asset_id);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn upload_artifact(
        &self,
        upload_url: &str,
        artifact: &Artifact,
        content: Bytes,
    ) -> Result<()> {
        let url = upload_endpoint(upload_url, artifact.name())?;
        log::info!("Uploading {} ({} bytes)", artifact.name(), content.len());
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, artifact.content_type())
            .header(CONTENT_LENGTH, content.len())
            .body(content);
        self.send(request).await?;
        Ok(())
    }
}

/// Expand the templated upload URL (`.../assets{?name,label}`) for `name`
pub(crate) fn upload_endpoint(upload_url: &str, name: &str) -> Result<Url> {
    let base = match upload_url.find('{') {
        Some(index) => &upload_url[..index],
        None => upload_url,
    };
    let mut url = Url::parse(base).map_err(|e| GitHubError::InvalidUrl {
        url: upload_url.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("name", name);
    Ok(url)
}
