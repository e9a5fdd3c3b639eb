//! telegram-connector - Telegram Bot API connector for host platforms
//!
//! Exposes the Telegram `sendMessage` method as a named operation that a
//! low-code backend can call with structured parameters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Host platform (HTTP API / CLI / embedded)                   │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ invoke("sendMessage", {chatId, text, ...})
//! ┌───────────────────────────▼──────────────────────────────────┐
//! │  TelegramConnector                                           │
//! │  - Operation catalog (labels, widgets, sample result)        │
//! │  - camelCase params → SendMessageRequest                     │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼──────────────────────────────────┐
//! │  MessageSender                                               │
//! │  - Payload with absent fields stripped                       │
//! │  - Error normalization ("Telegram Error: [code] desc")       │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ HttpClient (injected, reqwest default)
//!                             ▼
//!          POST https://api.telegram.org/bot{token}/sendMessage
//! ```
//!
//! ## Modules
//!
//! - [`telegram`]: Bot API request/response types and the message sender
//! - [`transport`]: HTTP client seam and the reqwest implementation
//! - [`connector`]: Host-facing operation dispatch and manifest
//! - [`server`]: HTTP API for hosts calling over the network
//! - [`config`]: Configuration management

pub mod config;
pub mod connector;
pub mod error;
pub mod server;
pub mod telegram;
pub mod transport;

pub use config::ConnectorConfig;
pub use connector::TelegramConnector;
pub use error::{Error, Result};
