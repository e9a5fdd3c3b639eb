//! Operation catalog served to the host platform
//!
//! Labels, widget hints and sample results are presentation data for the
//! host's UI. Nothing in the connector branches on them.

use serde::Serialize;
use serde_json::{json, Value};

/// Connector description: settings plus operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorManifest {
    pub name: String,
    pub label: String,
    pub version: String,
    pub settings: Vec<ParamSpec>,
    pub operations: Vec<OperationSpec>,
}

/// One callable operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    pub name: String,
    pub label: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub sample_result: Value,
}

/// One input field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub name: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ParamSpec {
    fn new(name: &str, label: &str, required: bool, widget: Widget) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            required,
            secret: false,
            widget,
            hint: None,
        }
    }

    fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// UI widget hint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    Text,
    Textarea,
    Number,
    Switch,
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    fn new(label: &str, value: Value) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Full catalog of this connector
pub fn connector_manifest() -> ConnectorManifest {
    ConnectorManifest {
        name: "telegram".to_string(),
        label: "Telegram Bot".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        settings: vec![ParamSpec::new("botToken", "Bot Token", true, Widget::Text)
            .secret()
            .hint("Token issued by @BotFather")],
        operations: vec![send_message_spec()],
    }
}

fn send_message_spec() -> OperationSpec {
    OperationSpec {
        name: "sendMessage".to_string(),
        label: "Send Message".to_string(),
        description: "Send a text message to a user, group or channel".to_string(),
        params: vec![
            ParamSpec::new("chatId", "Chat ID", true, Widget::Text)
                .hint("Numeric chat id or @channelusername"),
            ParamSpec::new("text", "Text", true, Widget::Textarea),
            ParamSpec::new(
                "parseMode",
                "Parse Mode",
                false,
                Widget::Select {
                    options: vec![
                        SelectOption::new("None", Value::Null),
                        SelectOption::new("Markdown", json!("Markdown")),
                        SelectOption::new("MarkdownV2", json!("MarkdownV2")),
                        SelectOption::new("HTML", json!("HTML")),
                    ],
                },
            ),
            ParamSpec::new(
                "disableWebPagePreview",
                "Disable Link Preview",
                false,
                Widget::Switch,
            ),
            ParamSpec::new(
                "disableNotification",
                "Send Silently",
                false,
                Widget::Switch,
            ),
            ParamSpec::new("replyToMessageId", "Reply To Message ID", false, Widget::Number),
        ],
        sample_result: json!({
            "ok": true,
            "result": {
                "message_id": 123,
                "from": {
                    "id": 123456789,
                    "is_bot": true,
                    "first_name": "MyBot",
                    "username": "my_bot"
                },
                "chat": {
                    "id": 987654321,
                    "first_name": "John",
                    "type": "private"
                },
                "date": 1700000000,
                "text": "Hello"
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_lists_send_message() {
        let manifest = connector_manifest();
        assert_eq!(manifest.operations.len(), 1);

        let op = &manifest.operations[0];
        assert_eq!(op.name, "sendMessage");
        let required: Vec<&str> = op
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(required, vec!["chatId", "text"]);
        assert_eq!(op.sample_result["result"]["message_id"], 123);
    }

    #[test]
    fn test_manifest_json_shape() {
        let value = serde_json::to_value(connector_manifest()).unwrap();

        assert_eq!(value["settings"][0]["name"], "botToken");
        assert_eq!(value["settings"][0]["secret"], true);

        let params = &value["operations"][0]["params"];
        assert_eq!(params[1]["widget"]["type"], "textarea");
        assert_eq!(params[2]["widget"]["type"], "select");
        assert_eq!(params[2]["widget"]["options"][3]["value"], "HTML");
        assert!(params[0].get("secret").is_none());
        assert!(value["operations"][0].get("sampleResult").is_some());
    }
}
