//! Host-facing connector
//!
//! The host platform calls operations by name with a JSON object of
//! camelCase parameters. [`TelegramConnector`] maps those calls onto the
//! [`MessageSender`] and hands back the Bot API response as JSON.

mod manifest;

pub use manifest::{
    connector_manifest, ConnectorManifest, OperationSpec, ParamSpec, SelectOption, Widget,
};

use crate::config::TelegramConfig;
use crate::error::{Error, Result};
use crate::telegram::{BotToken, MessageResponse, MessageSender, ParseMode, SendMessageRequest};
use crate::transport::{HttpClient, ReqwestClient};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Operations this connector registers with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SendMessage,
}

impl Operation {
    pub const ALL: [Operation; 1] = [Operation::SendMessage];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SendMessage => "sendMessage",
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

/// Host parameters for sendMessage; `null` and missing both mean absent
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParams {
    #[serde(deserialize_with = "chat_id_from_json")]
    pub chat_id: String,
    pub text: String,
    #[serde(default)]
    pub parse_mode: Option<String>,
    #[serde(default)]
    pub disable_web_page_preview: Option<bool>,
    #[serde(default)]
    pub disable_notification: Option<bool>,
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,
}

impl SendMessageParams {
    pub fn into_request(self) -> Result<SendMessageRequest> {
        let parse_mode = match self.parse_mode.as_deref() {
            Some(mode) => ParseMode::parse_optional(mode)?,
            None => None,
        };
        Ok(SendMessageRequest::new(self.chat_id, self.text)
            .parse_mode(parse_mode)
            .disable_web_page_preview(self.disable_web_page_preview)
            .disable_notification(self.disable_notification)
            .reply_to_message_id(self.reply_to_message_id))
    }
}

/// Chat ids arrive as strings or bare integers
fn chat_id_from_json<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_i64() => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "chatId must be a string or integer, got {}",
            other
        ))),
    }
}

/// Telegram connector exposed to the host platform
pub struct TelegramConnector {
    sender: MessageSender,
}

impl TelegramConnector {
    /// Build with the default reqwest client from configuration
    pub fn from_config(config: &TelegramConfig) -> Result<Self> {
        let token = config.resolve_token()?;
        let client = ReqwestClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(Arc::new(client), token, &config.api_base))
    }

    /// Build around a host-supplied HTTP client
    pub fn with_client(client: Arc<dyn HttpClient>, token: BotToken, api_base: &str) -> Self {
        tracing::info!("Telegram connector ready (bot {})", token.masked());
        Self {
            sender: MessageSender::new(client, token).with_api_base(api_base),
        }
    }

    pub fn sender(&self) -> &MessageSender {
        &self.sender
    }

    pub fn manifest(&self) -> ConnectorManifest {
        connector_manifest()
    }

    /// Run a host operation by name
    pub async fn invoke(&self, operation: &str, params: Value) -> Result<Value> {
        let operation: Operation = operation.parse()?;
        tracing::debug!("Invoking {}", operation.name());

        match operation {
            Operation::SendMessage => {
                let response = self.send_message(params).await?;
                Ok(response.into_inner())
            }
        }
    }

    async fn send_message(&self, params: Value) -> Result<MessageResponse> {
        let params: SendMessageParams = serde_json::from_value(params)
            .map_err(|e| Error::InvalidRequest(format!("Invalid sendMessage params: {}", e)))?;
        let request = params.into_request()?;
        self.sender.send(&request).await
    }
}
