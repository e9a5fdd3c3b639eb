use serde_json::Value;
use thiserror::Error;

/// Error reported by the Bot API with a structured body
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TelegramApiError {
    /// "Telegram Error: [<error_code>] <description>"
    pub message: String,
    /// HTTP status of the failed response
    pub status: Option<u16>,
    /// Raw error body
    pub data: Option<Value>,
}

impl TelegramApiError {
    /// Build from the body of a failed response
    pub fn from_body(status: Option<u16>, body: Value) -> Self {
        let code = body
            .get("error_code")
            .map(|c| match c {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .or_else(|| status.map(|s| s.to_string()))
            .unwrap_or_else(|| "unknown".to_string());
        let description = body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");

        Self {
            message: format!("Telegram Error: [{}] {}", code, description),
            status,
            data: Some(body),
        }
    }

    pub fn error_code(&self) -> Option<i64> {
        self.data.as_ref()?.get("error_code")?.as_i64()
    }

    pub fn description(&self) -> Option<&str> {
        self.data.as_ref()?.get("description")?.as_str()
    }

    /// Seconds to wait before the next call, sent with 429 responses
    pub fn retry_after(&self) -> Option<u64> {
        self.data
            .as_ref()?
            .get("parameters")?
            .get("retry_after")?
            .as_u64()
    }
}
