//! HTTP transport seam
//!
//! [`RemoteClient`](super::RemoteClient) builds fully-formed requests and hands
//! them to a [`Transport`], which only moves bytes.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::RemoteError;

/// HTTP verbs used against the Account Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A request ready to go on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a request and returns the raw response body.
///
/// Status codes are not interpreted here: the Account Service signals
/// failure in the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<String, RemoteError>;
}

/// Production transport backed by `reqwest`
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport. A zero timeout disables the request deadline.
    pub fn new(request_timeout_ms: u64) -> Result<Self, RemoteError> {
        let mut builder = Client::builder();
        if request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(request_timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, RemoteError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        tracing::trace!(status = %response.status(), url = %request.url, "Response received");

        Ok(response.text().await?)
    }
}
