use crate::utils::error::{HnError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const BODY_SNIPPET_CHARS: usize = 200;

/// API response envelope. One is created per request and discarded after
/// assertions run; the body is read to completion up front so the envelope
/// stays usable after the transport connection is gone.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    elapsed: Duration,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: String, elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    pub(crate) async fn from_reqwest(response: reqwest::Response, elapsed: Duration) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::new(status, headers, body, elapsed))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Wall-clock time of the request that produced this response.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Parses the body as JSON on each call. An empty body parses as `Null`,
    /// matching the API's `null` answer for nonexistent items.
    pub fn json(&self) -> Result<Value> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| HnError::JsonError {
            message: e.to_string(),
            body: self.body.clone(),
        })
    }

    /// Builds an error that carries the response body for context, pretty-printed
    /// when it is valid JSON and truncated to a readable snippet.
    pub fn error_with_body(&self, message: &str) -> HnError {
        let body = match serde_json::from_str::<Value>(&self.body) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone())
            }
            Err(_) => self.body.clone(),
        };
        HnError::UnexpectedStatus {
            message: message.to_string(),
            body: truncate_body(&body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_CHARS {
        return body.to_string();
    }
    let snippet: String = body.chars().take(BODY_SNIPPET_CHARS).collect();
    format!("{}...\n...\n(response body is truncated)", snippet)
}
