use crate::core::response::ApiResponse;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use reqwest::{redirect, Client};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Retry schedule for GET requests: when the response status is in
/// `status_codes`, the request is re-issued up to `attempts` times with
/// exponential backoff starting at `delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
    pub status_codes: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            delay: Duration::from_secs(1),
            status_codes: vec![429],
        }
    }
}

/// Per-request knobs for `RestClient::get`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub headers: Option<HashMap<String, String>>,
    /// Query parameters. Entries with a `None` value are dropped before sending.
    pub params: Option<HashMap<String, Option<String>>>,
    pub follow_redirects: bool,
    /// When set, a mismatching final status becomes an `UnexpectedStatus` error.
    pub expect_status: Option<u16>,
    /// Human log line for the request, e.g. "get top stories".
    pub message: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: None,
            params: None,
            follow_redirects: true,
            expect_status: None,
            message: None,
        }
    }
}

/// Thin GET-only client with retry-on-status and request/response logging.
pub struct RestClient {
    client: Client,
    retry: RetryPolicy,
    detailed_logs: bool,
}

impl RestClient {
    pub fn new(retry: RetryPolicy, detailed_logs: bool) -> Self {
        Self {
            client: Client::new(),
            retry,
            detailed_logs,
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self::new(
            RetryPolicy {
                attempts: config.retry_attempts(),
                delay: Duration::from_secs(config.retry_delay_seconds()),
                status_codes: config.retry_codes().to_vec(),
            },
            config.detailed_logs(),
        )
    }

    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<ApiResponse> {
        match &options.message {
            Some(message) => tracing::info!("{}", capitalize(message)),
            None => tracing::warn!("Please add log message for `GET {}`", url),
        }

        let headers = options.headers.unwrap_or_default();
        // drop empty query params
        let params: Vec<(String, String)> = options
            .params
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        // reqwest's redirect policy lives on the client, so opting out of
        // redirects needs a dedicated client for this request
        let client = if options.follow_redirects {
            self.client.clone()
        } else {
            Client::builder().redirect(redirect::Policy::none()).build()?
        };

        if self.detailed_logs {
            log_request(url, &headers, &params);
        }

        let mut attempt: u32 = 0;
        let response = loop {
            let mut request = client.get(url);
            for (key, value) in &headers {
                request = request.header(key.as_str(), value.as_str());
            }
            if !params.is_empty() {
                request = request.query(&params);
            }

            let started = Instant::now();
            let response = request.send().await?;
            let elapsed = started.elapsed();

            let status = response.status().as_u16();
            if self.retry.status_codes.contains(&status) && attempt < self.retry.attempts {
                let backoff = self.retry.delay * 2u32.pow(attempt);
                attempt += 1;
                tracing::warn!(
                    "Got status {} for GET {}, retrying in {:?} (attempt {}/{})",
                    status,
                    url,
                    backoff,
                    attempt,
                    self.retry.attempts
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            break ApiResponse::from_reqwest(response, elapsed).await?;
        };

        if self.detailed_logs {
            log_response(&response);
        }

        if let Some(expected) = options.expect_status {
            if response.status().as_u16() != expected {
                let message = options.message.as_deref().unwrap_or("send request");
                return Err(response.error_with_body(&format!(
                    "Failed to {}\nStatus code: {} ({} expected)",
                    message,
                    response.status().as_u16(),
                    expected
                )));
            }
        }

        Ok(response)
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn log_request(url: &str, headers: &HashMap<String, String>, params: &[(String, String)]) {
    let (host, path) = match url::Url::parse(url) {
        Ok(parsed) => {
            let mut host = parsed.host_str().unwrap_or_default().to_string();
            if let Some(port) = parsed.port() {
                host = format!("{}:{}", host, port);
            }
            (host, parsed.path().to_string())
        }
        Err(_) => (String::new(), url.to_string()),
    };
    let query = if params.is_empty() {
        String::new()
    } else {
        let joined: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("?{}", joined.join("&"))
    };
    let header_lines: Vec<String> = headers.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    tracing::debug!(
        "Request\nGET {}{} HTTP/1.1\nHost: {}\n{}\n{} End of request {}",
        path,
        query,
        host,
        header_lines.join("\n"),
        "-".repeat(25),
        "-".repeat(25)
    );
}

fn log_response(response: &ApiResponse) {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("undefined");

    let body = if !response.text().is_empty() && content_type.contains("json") {
        match response.json() {
            Ok(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| response.text().to_string()),
            Err(e) => {
                tracing::warn!("Failed to parse response JSON body. {}", e);
                response.text().to_string()
            }
        }
    } else {
        response.text().to_string()
    };

    let header_lines: Vec<String> = response
        .headers()
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.to_str().unwrap_or("<non-ascii>")))
        .collect();
    tracing::debug!(
        "Response ({:?})\nHTTP/1.1 {}\n{}\n\n{}\n{} End of response {}",
        response.elapsed(),
        response.status(),
        header_lines.join("\n"),
        body,
        "-".repeat(25),
        "-".repeat(25)
    );
}
