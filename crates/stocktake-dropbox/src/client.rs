// SPDX-FileCopyrightText: 2026 Stocktake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Dropbox content API.
//!
//! Provides [`DropboxStore`] which implements [`FileStore`] over
//! `files/download` and `files/upload` (mode `overwrite`). The store
//! offers no locking or version token; an upload is a whole-file
//! last-writer-wins overwrite.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use stocktake_config::model::DropboxConfig;
use stocktake_core::traits::adapter::PluginAdapter;
use stocktake_core::traits::store::FileStore;
use stocktake_core::types::{AdapterType, HealthStatus};
use stocktake_core::StocktakeError;
use tracing::debug;

/// Base URL for Dropbox RPC endpoints (account, metadata).
const API_BASE_URL: &str = "https://api.dropboxapi.com/2";

/// Base URL for Dropbox content endpoints (download, upload).
const CONTENT_BASE_URL: &str = "https://content.dropboxapi.com/2";

/// Dropbox-backed remote file store.
#[derive(Debug, Clone)]
pub struct DropboxStore {
    client: reqwest::Client,
    api_base_url: String,
    content_base_url: String,
}

impl DropboxStore {
    /// Creates a new Dropbox store client.
    ///
    /// Requires `config.access_token` to be set.
    pub fn new(config: &DropboxConfig) -> Result<Self, StocktakeError> {
        let token = config.access_token.as_deref().ok_or_else(|| {
            StocktakeError::Config("dropbox.access_token is required for Dropbox store".into())
        })?;

        if token.is_empty() {
            return Err(StocktakeError::Config(
                "dropbox.access_token cannot be empty".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {token}");
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|e| {
                StocktakeError::Config(format!("invalid access token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StocktakeError::Store {
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            api_base_url: API_BASE_URL.to_string(),
            content_base_url: CONTENT_BASE_URL.to_string(),
        })
    }

    /// Overrides both base URLs (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.to_string();
        self.content_base_url = url.to_string();
        self
    }

    fn api_arg(path: &str) -> Result<HeaderValue, StocktakeError> {
        let arg = serde_json::json!({ "path": path }).to_string();
        HeaderValue::from_str(&arg).map_err(|e| {
            StocktakeError::Store {
                source: Box::new(std::io::Error::other(format!(
                    "unencodable Dropbox path {path:?}: {e}"
                ))),
            }
        })
    }

    fn upload_arg(path: &str) -> Result<HeaderValue, StocktakeError> {
        let arg = serde_json::json!({ "path": path, "mode": "overwrite", "mute": true })
            .to_string();
        HeaderValue::from_str(&arg).map_err(|e| {
            StocktakeError::Store {
                source: Box::new(std::io::Error::other(format!(
                    "unencodable Dropbox path {path:?}: {e}"
                ))),
            }
        })
    }
}

fn store_error(message: String) -> StocktakeError {
    StocktakeError::Store {
        source: Box::new(std::io::Error::other(message)),
    }
}

#[async_trait]
impl PluginAdapter for DropboxStore {
    fn name(&self) -> &str {
        "dropbox"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::FileStore
    }

    async fn health_check(&self) -> Result<HealthStatus, StocktakeError> {
        // Verify the token by asking for the current account.
        let url = format!("{}/users/get_current_account", self.api_base_url);
        match self.client.post(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Unhealthy(format!(
                "Dropbox returned {}",
                response.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Dropbox unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), StocktakeError> {
        debug!("Dropbox store shutting down");
        Ok(())
    }
}

#[async_trait]
impl FileStore for DropboxStore {
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>, StocktakeError> {
        let url = format!("{}/files/download", self.content_base_url);
        let response = self
            .client
            .post(&url)
            .header("Dropbox-API-Arg", Self::api_arg(path)?)
            .send()
            .await
            .map_err(|e| StocktakeError::Store {
                source: Box::new(e),
            })?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(|e| StocktakeError::Store {
                source: Box::new(e),
            })?;
            debug!(path, len = bytes.len(), "downloaded file");
            return Ok(Some(bytes.to_vec()));
        }

        let body = response.text().await.unwrap_or_default();
        // 409 carries a structured error_summary; path/not_found means the
        // file simply does not exist yet.
        if status == reqwest::StatusCode::CONFLICT && body.contains("not_found") {
            debug!(path, "remote file not found");
            return Ok(None);
        }

        Err(store_error(format!(
            "download of {path} failed with {status}: {body}"
        )))
    }

    async fn store(&self, path: &str, bytes: Vec<u8>) -> Result<(), StocktakeError> {
        let url = format!("{}/files/upload", self.content_base_url);
        let len = bytes.len();
        let response = self
            .client
            .post(&url)
            .header("Dropbox-API-Arg", Self::upload_arg(path)?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StocktakeError::Store {
                source: Box::new(e),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(path, len, "uploaded file");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(store_error(format!(
            "upload of {path} failed with {status}: {body}"
        )))
    }
}
