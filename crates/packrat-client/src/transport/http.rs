//! HTTP transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use packrat_core::config::api::ApiConfig;
use packrat_core::error::AppError;
use packrat_core::AppResult;

use super::{Method, RequestBody, Transport};

/// [`Transport`] implementation backed by a shared [`reqwest::Client`].
///
/// Carries a bounded request timeout and no retry logic; a failed request
/// is surfaced to the caller, who may retry.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from API settings.
    ///
    /// The base URL is validated here so a bad configuration fails at
    /// startup instead of on the first request.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| {
            AppError::configuration(format!("invalid base URL `{}`: {e}", config.base_url))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> AppResult<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "inventory request");

        let mut request = self.client.request(method, &url);
        match body {
            Some(RequestBody::Json(json)) => request = request.json(&json),
            Some(RequestBody::Text(text)) => request = request.body(text),
            None => {}
        }

        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "inventory request failed");
            AppError::with_source(
                packrat_core::error::ErrorKind::Transport,
                format!("request to {url} failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("{url} returned 404")));
        }
        if !status.is_success() {
            warn!(%url, %status, "inventory request rejected");
            return Err(AppError::transport(format!("{url} returned {status}")));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            // Upsert and delete responses are implementation-defined and
            // may be empty.
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            AppError::with_source(
                packrat_core::error::ErrorKind::Transport,
                format!("invalid JSON from {url}: {e}"),
                e,
            )
        })
    }
}
