//! Account Service REST Client
//!
//! Thin parameterizations of a single [`RemoteClient::call`] entry point.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{HttpRequest, HttpTransport, Method, Transport};
use super::RemoteError;
use crate::model::{Account, Credentials, Registration, Transaction, TransactionDraft};

/// One logical call against the Account Service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
    pub use_auth: bool,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Get,
            body: None,
            use_auth: true,
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Post,
            body: Some(body),
            use_auth: true,
        }
    }

    /// Never send the bearer token, even if one is held
    pub fn without_auth(mut self) -> Self {
        self.use_auth = false;
        self
    }
}

/// Body of a successful `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The issued token, if one was actually returned
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Account Service client
pub struct RemoteClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the JSON reply.
    ///
    /// `Content-Type` is set iff a body is present; `Authorization` iff the
    /// request uses auth and `token` is held. A reply object carrying an
    /// `error` field is returned as [`RemoteError::Application`].
    pub async fn call(&self, request: ApiRequest, token: Option<&str>) -> Result<Value, RemoteError> {
        let mut headers = Vec::new();

        let body = match &request.body {
            Some(body) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(body.to_string())
            }
            None => None,
        };

        if request.use_auth {
            if let Some(token) = token {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        let url = format!("{}{}", self.base_url, request.endpoint);
        tracing::debug!(method = request.method.as_str(), url = %url, "Calling Account Service");

        let text = self
            .transport
            .send(HttpRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %request.endpoint, error = %e, "Transport failure");
                e
            })?;

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| RemoteError::Transport(format!("Invalid JSON response: {}", e)))?;

        if let Some(message) = error_message(&value) {
            tracing::debug!(endpoint = %request.endpoint, error = %message, "Account Service returned error");
            return Err(RemoteError::Application(message));
        }

        Ok(value)
    }

    async fn call_as<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        token: Option<&str>,
    ) -> Result<R, RemoteError> {
        let value = self.call(request, token).await?;
        serde_json::from_value(value)
            .map_err(|e| RemoteError::Transport(format!("Unexpected response: {}", e)))
    }

    /// `POST /auth/login`, never authenticated
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, RemoteError> {
        let request = ApiRequest::post("/auth/login", to_body(credentials)?).without_auth();
        self.call_as(request, None).await
    }

    /// `GET /accounts/:user`
    pub async fn fetch_account(&self, user: &str, token: Option<&str>) -> Result<Account, RemoteError> {
        let request = ApiRequest::get(format!("/accounts/{}", urlencoding::encode(user)));
        self.call_as(request, token).await
    }

    /// `POST /auth/register`, returns the created account
    pub async fn register(
        &self,
        registration: &Registration,
        token: Option<&str>,
    ) -> Result<Account, RemoteError> {
        let request = ApiRequest::post("/auth/register", to_body(registration)?);
        self.call_as(request, token).await
    }

    /// `POST /accounts/:user/transactions`, returns the booked transaction
    pub async fn post_transaction(
        &self,
        user: &str,
        draft: &TransactionDraft,
        token: Option<&str>,
    ) -> Result<Transaction, RemoteError> {
        let request = ApiRequest::post(
            format!("/accounts/{}/transactions", urlencoding::encode(user)),
            to_body(draft)?,
        );
        self.call_as(request, token).await
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, RemoteError> {
    serde_json::to_value(body).map_err(|e| RemoteError::Transport(format!("Request build error: {}", e)))
}

/// Extract a failure message from an `{error}` reply. Falsy error fields
/// (`null`, `false`, `0`, `""`) do not count as failures.
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}
