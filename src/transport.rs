//! HTTP transport seam
//!
//! The connector never talks to the network directly. Every outbound call is
//! described as an [`HttpRequest`] and handed to an [`HttpClient`], so the
//! host can inject its own client and tests can record requests without a
//! network. [`ReqwestClient`] is the default implementation.

use crate::telegram::mask_token;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request handed to an [`HttpClient`]
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Query parameters, already passed through [`clean_query`]
    pub query: Map<String, Value>,
    /// JSON body
    pub body: Option<Value>,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &mask_url_token(&self.url))
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}

/// Mask the `bot<token>` path segment of a Bot API URL
pub fn mask_url_token(url: &str) -> String {
    let Some(start) = url.find("/bot") else {
        return url.to_string();
    };
    let token_start = start + "/bot".len();
    let token_end = url[token_start..]
        .find('/')
        .map_or(url.len(), |i| token_start + i);
    format!(
        "{}{}{}",
        &url[..token_start],
        mask_token(&url[token_start..token_end]),
        &url[token_end..]
    )
}

/// Transport failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request never produced a response (connect, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote answered with a JSON error body
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: Value },

    /// Remote answered with something that is not JSON
    #[error("Unexpected HTTP {status} response: {text}")]
    UnexpectedResponse { status: u16, text: String },

    /// Failure raised by a host-supplied client
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary error from a host-supplied client
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(err.into())
    }

    /// HTTP status attached to the failure, if any response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Other(_) => None,
        }
    }

    /// JSON object body carried by the failure
    pub fn structured_body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } if body.is_object() => Some(body),
            _ => None,
        }
    }
}

/// Client capable of issuing one JSON request
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue the request and return the decoded JSON body on success
    async fn request(&self, request: HttpRequest) -> Result<Value, TransportError>;
}

/// Drop query entries with no value
pub fn clean_query(query: Map<String, Value>) -> Map<String, Value> {
    query.into_iter().filter(|(_, v)| !v.is_null()).collect()
}

/// Default [`HttpClient`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn request(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            let pairs: Vec<(String, String)> = request
                .query
                .iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), v)
                })
                .collect();
            builder = builder.query(&pairs);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // reqwest errors carry the request URL, which embeds the bot token
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => {
                return Err(TransportError::UnexpectedResponse {
                    status: status.as_u16(),
                    text,
                })
            }
        };

        // Bot API reports failures as {"ok": false, ...}
        let api_failed = body.get("ok").and_then(Value::as_bool) == Some(false);
        if !status.is_success() || api_failed {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
