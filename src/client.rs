//! HTTP client for the catalog API used by the console program.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dto::MovieDto;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not connect to {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("malformed response from {url}: {source}")]
    Decode { url: String, source: serde_json::Error },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },
}

impl ClientError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            ClientError::Timeout { url }
        } else if err.is_connect() {
            ClientError::Connect { url, source: err }
        } else {
            ClientError::Transport { url, source: err }
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent("movie-client/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// Category names exactly as the API returns them.
    pub async fn categories(&self) -> Result<Vec<serde_json::Value>, ClientError> {
        self.get_json("api/categories").await
    }

    pub async fn movies_for_category(&self, id: i32) -> Result<Vec<MovieDto>, ClientError> {
        self.get_json(&format!("api/categories/{id}/movies")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(url = %url, "GET");

        let resp = self.http.get(&url).send().await.map_err(|e| ClientError::from_reqwest(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let body = resp.text().await.map_err(|e| ClientError::from_reqwest(&url, e))?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
    }
}
