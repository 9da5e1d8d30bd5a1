//! The request/response boundary between the client and the service.
//!
//! Everything the client does goes through a single capability: one
//! independent HTTP-shaped request per call, no session state, no retries.
//! The trait seam exists so the item service can be driven against an
//! in-memory fake in tests.

pub mod http;

use async_trait::async_trait;

use packrat_core::AppResult;

pub use reqwest::Method;

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// A JSON document, sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// A raw string body, used by the tag-value PUT endpoint.
    Text(String),
}

/// A single request/response capability against the inventory API.
///
/// Each call is independent. A non-2xx response surfaces as a typed
/// failure: 404 maps to a not-found error, any other non-success status to
/// a transport error. An empty response body decodes as JSON `null`.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issue one request and return the decoded JSON response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> AppResult<serde_json::Value>;
}
