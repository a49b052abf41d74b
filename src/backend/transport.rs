//! HTTP transport used by the REST backend and the identity provider.
//!
//! Requests and responses are plain values so tests can swap the reqwest
//! client for a recording mock.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::backend::BackendError;

/// HTTP method subset the backend needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        HttpRequest {
            method: Method::Get,
            url,
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: Url, body: serde_json::Value) -> Self {
        HttpRequest {
            method: Method::Post,
            url,
            bearer: None,
            body: Some(body),
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a JSON body, failing on non-2xx statuses.
    pub fn json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, BackendError> {
        if !self.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: self.status,
            });
        }
        serde_json::from_slice(&self.body).map_err(|source| BackendError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Sends one request and returns the response. No retries.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BackendError>;
}

/// Blocking reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client. `timeout` of `None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("cupboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| BackendError::Transport {
            url: String::new(),
            message: e.to_string(),
        })?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BackendError> {
        let url = request.url.to_string();
        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| BackendError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| BackendError::Transport {
                url,
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
