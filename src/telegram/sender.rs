use super::error::TelegramApiError;
use super::types::{BotToken, MessageResponse, SendMessageRequest};
use crate::error::{Error, Result};
use crate::transport::{clean_query, HttpClient, HttpMethod, HttpRequest, TransportError};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Default Bot API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Sends text messages through the Bot API
pub struct MessageSender {
    client: Arc<dyn HttpClient>,
    token: BotToken,
    api_base: String,
}

impl MessageSender {
    /// Create a sender using the injected HTTP client
    pub fn new(client: Arc<dyn HttpClient>, token: BotToken) -> Self {
        Self {
            client,
            token,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the sender at a different Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token.expose(), method)
    }

    fn masked_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token.masked(), method)
    }

    /// Send a text message
    pub async fn send(&self, request: &SendMessageRequest) -> Result<MessageResponse> {
        request.validate()?;
        let body = self.call("sendMessage", Map::new(), request.payload()?).await?;
        Ok(MessageResponse(body))
    }

    /// POST a Bot API method and normalize its failures
    async fn call(&self, method: &str, query: Map<String, Value>, body: Value) -> Result<Value> {
        let query = clean_query(query);
        let query_json = Value::Object(query.clone());

        tracing::debug!(
            http_method = HttpMethod::Post.as_str(),
            url = %self.masked_url(method),
            query = %query_json,
            "Calling Telegram Bot API"
        );

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.method_url(method),
            query,
            body: Some(body),
        };

        match self.client.request(request).await {
            Ok(body) => Ok(body),
            Err(e) => {
                let err = normalize(e);
                tracing::error!("Telegram {} failed: {}", method, err);
                Err(err)
            }
        }
    }
}

/// Structured bodies become [`TelegramApiError`]; anything else passes through
fn normalize(err: TransportError) -> Error {
    match err.structured_body() {
        Some(body) => Error::Telegram(TelegramApiError::from_body(err.status(), body.clone())),
        None => Error::Transport(err),
    }
}
