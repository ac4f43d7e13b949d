//! HTTP client for the Election Map API.

use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::api::FieldError;
use crate::area::{AreaResult, YearsResult};

/// Error envelope returned by the API for non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: Option<String>,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code)?,
            None => write!(f, "{}", self.message)?,
        }
        for field_error in &self.field_errors {
            write!(f, "\n  {}: {}", field_error.field, field_error.message)?;
        }
        Ok(())
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server: &str) -> anyhow::Result<Self> {
        let base = Url::parse(server).with_context(|| format!("invalid server URL: {}", server))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("cannot build URL for {}", path))
    }

    pub async fn years(&self) -> anyhow::Result<YearsResult> {
        self.get_json(self.endpoint("/api/years")?).await
    }

    pub async fn area(&self, query: &[(&str, String)]) -> anyhow::Result<AreaResult> {
        let mut url = self.endpoint("/api/area")?;
        url.query_pairs_mut().extend_pairs(query);
        self.get_json(url).await
    }

    /// Health document; a degraded (503) server still yields its body
    pub async fn health(&self) -> anyhow::Result<Value> {
        let url = self.endpoint("/health")?;
        let response = self
            .http
            .get(url.clone())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .with_context(|| format!("cannot reach {}", url))?;

        match response.status() {
            status if status.is_success() || status == StatusCode::SERVICE_UNAVAILABLE => {
                Ok(response.json().await?)
            }
            status => anyhow::bail!("health check failed with HTTP {}", status),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> anyhow::Result<T> {
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("cannot reach {}", url))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .with_context(|| format!("unexpected response body from {}", url));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) => anyhow::bail!("{}", error),
            Err(_) => anyhow::bail!("request failed with HTTP {}", status),
        }
    }
}
