//! Telegram Bot API sendMessage support
//!
//! [`MessageSender`] turns a [`SendMessageRequest`] into one POST against
//! `{api_base}/bot{token}/sendMessage` and hands it to the injected
//! [`HttpClient`](crate::transport::HttpClient).

mod error;
mod sender;
mod types;

pub use error::TelegramApiError;
pub use sender::{MessageSender, DEFAULT_API_BASE};
pub use types::{mask_token, BotToken, MessageResponse, ParseMode, SendMessageRequest};

#[cfg(test)]
pub(crate) use sender::tests::{MockClient, TEST_TOKEN};
