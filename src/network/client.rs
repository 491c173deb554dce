//! HTTP client wrapper - validates, executes and formats requests

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::IgnoredAny;

use crate::constants::{APP_NAME, APP_VERSION, DEFAULT_TIMEOUT};
use crate::error::{ExecuteError, FormatError};
use crate::highlight::ResponseFormatter;
use crate::models::{HttpMethod, RawResponse};

/// Settings for the shared HTTP client
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Deadline for each request, measured from issuance to the end of the body
    pub timeout: Duration,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` style environment variables
    pub proxy_from_env: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", APP_NAME, APP_VERSION),
            proxy_from_env: true,
        }
    }
}

impl ClientConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        let builder = if self.proxy_from_env {
            builder
        } else {
            builder.no_proxy()
        };
        builder.build()
    }
}

/// Sends one prepared request and reads the whole response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: reqwest::Request) -> Result<RawResponse, ExecuteError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<RawResponse, ExecuteError> {
        let response = self.execute(request).await.map_err(ExecuteError::Transport)?;

        let status = status_line(response.status());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ExecuteError::Transport(e)
            } else {
                ExecuteError::BodyRead(e)
            }
        })?;

        Ok(RawResponse {
            body: body.to_vec(),
            status,
            content_type,
        })
    }
}

/// `200 OK` style status line
pub fn status_line(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// A completed exchange ready for display
#[derive(Debug)]
pub struct Exchange {
    pub status: String,
    pub content_type: String,
    /// Body decoded as text, unformatted
    pub raw_body: String,
    /// Annotated text, or the escaped raw body if formatting failed
    pub display: String,
    pub format_error: Option<FormatError>,
    pub time_ms: u64,
}

/// Issues single GET/POST requests through a shared transport
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl RequestExecutor {
    /// Executor backed by a real HTTP client built from `config`
    pub fn new(config: ClientConfig) -> Result<Self, ExecuteError> {
        let client = config
            .build_client()
            .map_err(|e| ExecuteError::RequestConstruction(e.to_string()))?;
        Ok(Self::with_transport(Arc::new(client), config))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        RequestExecutor { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        body: &str,
    ) -> Result<RawResponse, ExecuteError> {
        self.execute_with_timeout(method, url, body, self.config.timeout)
            .await
    }

    /// Execute with a deadline other than the configured one
    pub async fn execute_with_timeout(
        &self,
        method: &str,
        url: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<RawResponse, ExecuteError> {
        let request = build_request(method, url, body, timeout)?;
        tracing::info!(method, url = %request.url(), "Sending request");
        self.transport.send(request).await
    }

    /// Execute, then format the body; a format failure still yields the raw body
    pub async fn perform(
        &self,
        formatter: &ResponseFormatter,
        method: &str,
        url: &str,
        body: &str,
    ) -> Result<Exchange, ExecuteError> {
        let start = Instant::now();
        let raw = self.execute(method, url, body).await?;
        let time_ms = start.elapsed().as_millis() as u64;

        let raw_body = raw.text();
        let (display, format_error) = match formatter.format(&raw.body, &raw.content_type) {
            Ok(text) => (text, None),
            Err(e) => {
                tracing::warn!(error = %e, content_type = %raw.content_type, "Showing unformatted response");
                (crate::highlight::escape(&raw_body), Some(e))
            }
        };

        Ok(Exchange {
            status: raw.status,
            content_type: raw.content_type,
            raw_body,
            display,
            format_error,
            time_ms,
        })
    }
}

/// Validate inputs and build the outbound request; never touches the network
pub fn build_request(
    method: &str,
    url: &str,
    body: &str,
    timeout: Duration,
) -> Result<reqwest::Request, ExecuteError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ExecuteError::EmptyUrl);
    }

    let method: HttpMethod = method.parse()?;
    if method.has_body() {
        serde_json::from_str::<IgnoredAny>(body).map_err(ExecuteError::InvalidBody)?;
    }

    let parsed = reqwest::Url::parse(url)
        .map_err(|e| ExecuteError::RequestConstruction(format!("invalid URL '{}': {}", url, e)))?;

    let mut request = match method {
        HttpMethod::GET => reqwest::Request::new(reqwest::Method::GET, parsed),
        HttpMethod::POST => {
            let mut request = reqwest::Request::new(reqwest::Method::POST, parsed);
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(body.to_string().into());
            request
        }
    };
    *request.timeout_mut() = Some(timeout);
    Ok(request)
}
