pub mod schema;

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::models::config::ResolveConfig;
use crate::utils::errors::TalosError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct ModrinthClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModrinthClient {
    pub fn from_config(config: &ResolveConfig) -> Result<Self> {
        Self::with_base_url(&config.api_base_url)
    }

    /// Creates a client against a custom API base (a mirror, or a mock server in tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Cannot modify URL path of {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs `segments` below the API base and decodes the JSON body.
    ///
    /// Every failure, whether transport, non-2xx status, or an undecodable
    /// body, is a [`TalosError::BadRequest`]; nothing is retried.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        debug!("GET {}", url);
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                return Err(bad_request(err, &url, None, "failed to send request"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(TalosError::BadRequest {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("status {}", status),
            }));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| {
                bad_request(err, &url, Some(status.as_u16()), "invalid response body")
            })
    }

    pub async fn search(&self, query: &str) -> Result<schema::SearchResponse> {
        self.get_json(&["search"], &[("query", query)]).await
    }

    pub async fn project_versions(&self, project_id: &str) -> Result<Vec<schema::Version>> {
        self.get_json(&["project", project_id, "version"], &[])
            .await
    }

    pub async fn version(&self, version_id: &str) -> Result<schema::Version> {
        self.get_json(&["version", version_id], &[]).await
    }

    /// Fetches the raw bytes behind an absolute file URL.
    pub async fn download_file(&self, download_url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", download_url);
        let response = self
            .client
            .get(download_url)
            .send()
            .await
            .with_context(|| format!("Failed to download file from {}", download_url))?;

        if !response.status().is_success() {
            return Err(anyhow!(TalosError::DownloadFailed {
                url: download_url.to_string(),
                status: response.status().as_u16(),
            }));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read file bytes from {}", download_url))?;

        Ok(bytes.to_vec())
    }
}

fn bad_request(
    err: reqwest::Error,
    url: &Url,
    status: Option<u16>,
    reason: &str,
) -> anyhow::Error {
    anyhow::Error::new(err).context(TalosError::BadRequest {
        url: url.to_string(),
        status,
        reason: reason.to_string(),
    })
}
