//! Bot API wire types for sendMessage

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

/// Bot token, wiped from memory on drop
#[derive(Clone)]
pub struct BotToken(Zeroizing<String>);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Config("Telegram bot token is empty".to_string()));
        }
        Ok(Self(Zeroizing::new(token)))
    }

    /// Raw token, only for building request URLs
    pub(crate) fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Token safe for logs: first 8 + last 4 chars visible
    pub fn masked(&self) -> String {
        mask_token(self.expose())
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BotToken").field(&self.masked()).finish()
    }
}

/// Mask a token for display: show first 8 + last 4 chars
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Text formatting mode understood by Telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::MarkdownV2 => "MarkdownV2",
            Self::Html => "HTML",
        }
    }

    /// Parse a host-supplied value; "none" and "" mean no parse mode
    pub fn parse_optional(value: &str) -> Result<Option<Self>> {
        match value.trim() {
            "" => Ok(None),
            v if v.eq_ignore_ascii_case("none") => Ok(None),
            v => v.parse::<Self>().map(Some),
        }
    }
}

impl std::str::FromStr for ParseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Markdown" | "markdown" => Ok(Self::Markdown),
            "MarkdownV2" | "markdownv2" | "markdown_v2" => Ok(Self::MarkdownV2),
            v if v.eq_ignore_ascii_case("html") => Ok(Self::Html),
            other => Err(Error::InvalidRequest(format!(
                "Unsupported parse mode: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// sendMessage request, serialized with Bot API field names.
/// Absent optionals are left out of the payload entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl SendMessageRequest {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            disable_notification: None,
            reply_to_message_id: None,
        }
    }

    pub fn parse_mode(mut self, mode: impl Into<Option<ParseMode>>) -> Self {
        self.parse_mode = mode.into();
        self
    }

    pub fn disable_web_page_preview(mut self, disable: impl Into<Option<bool>>) -> Self {
        self.disable_web_page_preview = disable.into();
        self
    }

    pub fn disable_notification(mut self, disable: impl Into<Option<bool>>) -> Self {
        self.disable_notification = disable.into();
        self
    }

    pub fn reply_to_message_id(mut self, message_id: impl Into<Option<i64>>) -> Self {
        self.reply_to_message_id = message_id.into();
        self
    }

    /// Reject requests missing a required field
    pub fn validate(&self) -> Result<()> {
        if self.chat_id.trim().is_empty() {
            return Err(Error::InvalidRequest("chat_id is required".to_string()));
        }
        if self.text.is_empty() {
            return Err(Error::InvalidRequest("text is required".to_string()));
        }
        Ok(())
    }

    /// JSON body sent to the Bot API
    pub fn payload(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Response body from the Bot API, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageResponse(pub Value);

impl MessageResponse {
    /// `ok` flag of the Bot API envelope, if present
    pub fn ok(&self) -> Option<bool> {
        self.0.get("ok").and_then(Value::as_bool)
    }

    /// Identifier of the sent message, enveloped or bare
    pub fn message_id(&self) -> Option<i64> {
        self.0
            .get("result")
            .and_then(|r| r.get("message_id"))
            .or_else(|| self.0.get("message_id"))
            .and_then(Value::as_i64)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_payload() {
        let req = SendMessageRequest::new("123", "Hello");
        assert_eq!(
            req.payload().unwrap(),
            json!({"chat_id": "123", "text": "Hello"})
        );
    }

    #[test]
    fn test_full_payload_uses_remote_names() {
        let req = SendMessageRequest::new("-100200", "<b>hi</b>")
            .parse_mode(ParseMode::Html)
            .disable_web_page_preview(true)
            .disable_notification(false)
            .reply_to_message_id(Some(42));

        assert_eq!(
            req.payload().unwrap(),
            json!({
                "chat_id": "-100200",
                "text": "<b>hi</b>",
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
                "disable_notification": false,
                "reply_to_message_id": 42
            })
        );
    }

    #[test]
    fn test_partial_payload_omits_absent_fields() {
        let req = SendMessageRequest::new("1", "x")
            .parse_mode(ParseMode::MarkdownV2)
            .reply_to_message_id(Option::<i64>::None);

        let payload = req.payload().unwrap();
        let obj = payload.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["parse_mode"], "MarkdownV2");
        assert!(!obj.contains_key("reply_to_message_id"));
        assert!(!obj.contains_key("disable_notification"));
        assert!(obj.values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_reply_to_accepts_plain_and_optional_ids() {
        let plain = SendMessageRequest::new("1", "x").reply_to_message_id(7_i64);
        assert_eq!(plain.reply_to_message_id, Some(7));

        let optional = SendMessageRequest::new("1", "x").reply_to_message_id(Some(8));
        assert_eq!(optional.reply_to_message_id, Some(8));

        let cleared = optional.reply_to_message_id(Option::<i64>::None);
        assert_eq!(cleared.reply_to_message_id, None);
    }

    #[test]
    fn test_validate_requires_chat_and_text() {
        assert!(SendMessageRequest::new("1", "x").validate().is_ok());
        assert!(matches!(
            SendMessageRequest::new("", "x").validate(),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            SendMessageRequest::new("1", "").validate(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_mode_parsing() {
        assert_eq!("HTML".parse::<ParseMode>().unwrap(), ParseMode::Html);
        assert_eq!("html".parse::<ParseMode>().unwrap(), ParseMode::Html);
        assert_eq!(
            "MarkdownV2".parse::<ParseMode>().unwrap(),
            ParseMode::MarkdownV2
        );
        assert!("bbcode".parse::<ParseMode>().is_err());

        assert_eq!(ParseMode::parse_optional("none").unwrap(), None);
        assert_eq!(ParseMode::parse_optional("").unwrap(), None);
        assert_eq!(
            ParseMode::parse_optional("Markdown").unwrap(),
            Some(ParseMode::Markdown)
        );
    }

    #[test]
    fn test_parse_mode_serde_names() {
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), json!("HTML"));
        let mode: ParseMode = serde_json::from_value(json!("MarkdownV2")).unwrap();
        assert_eq!(mode, ParseMode::MarkdownV2);
    }

    #[test]
    fn test_message_response_accessors() {
        let resp = MessageResponse(json!({
            "ok": true,
            "result": {"message_id": 123, "text": "Hello"}
        }));
        assert_eq!(resp.ok(), Some(true));
        assert_eq!(resp.message_id(), Some(123));

        let bare = MessageResponse(json!({"message_id": 7}));
        assert_eq!(bare.message_id(), Some(7));
        assert_eq!(bare.ok(), None);
    }

    #[test]
    fn test_bot_token_masking() {
        let token = BotToken::new("123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw"));
        assert_eq!(token.masked(), "12345678...Dsaw");

        assert_eq!(mask_token("short"), "****");
        assert!(BotToken::new("  ").is_err());
    }
}
