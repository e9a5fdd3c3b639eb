//! Connector configuration management

use crate::error::{Error, Result};
use crate::telegram::{BotToken, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var overriding the config file location
pub const CONFIG_ENV: &str = "TELEGRAM_CONNECTOR_CONFIG";

/// Main connector configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Host-facing HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl ConnectorConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from an explicit path, the default location, or fall back to defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/telegram-connector/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("telegram-connector").join("config.toml"))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token; empty means read it from `bot_token_env`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bot_token: String,

    /// Env var holding the bot token
    pub bot_token_env: String,

    /// Bot API base URL
    pub api_base: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl TelegramConfig {
    /// Resolve the bot token from the literal setting or its env var
    pub fn resolve_token(&self) -> Result<BotToken> {
        if !self.bot_token.trim().is_empty() {
            return BotToken::new(self.bot_token.clone());
        }
        let token = std::env::var(&self.bot_token_env).map_err(|_| {
            Error::Config(format!(
                "Telegram bot token not configured (set telegram.bot_token or {})",
                self.bot_token_env
            ))
        })?;
        BotToken::new(token)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 18791,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ConnectorConfig::default();
        assert_eq!(config.server.port, 18791);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.telegram.timeout_secs, 30);
        assert!(config.telegram.bot_token.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConnectorConfig::from_toml(
            r#"
            [telegram]
            bot_token = "123456789:abcdef"
            "#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token, "123456789:abcdef");
        assert_eq!(config.telegram.bot_token_env, "TELEGRAM_BOT_TOKEN");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[telegram]\napi_base = \"http://localhost:8081\"\ntimeout_secs = 5\n\n[server]\nport = 9000"
        )
        .unwrap();

        let config = ConnectorConfig::discover(Some(file.path())).unwrap();
        assert_eq!(config.telegram.api_base, "http://localhost:8081");
        assert_eq!(config.telegram.timeout_secs, 5);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ConnectorConfig::from_toml("[telegram\n").unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn test_resolve_literal_token() {
        let config = TelegramConfig {
            bot_token: "123456789:literal-token".to_string(),
            ..Default::default()
        };
        let token = config.resolve_token().unwrap();
        assert_eq!(token.expose(), "123456789:literal-token");
    }

    #[test]
    fn test_resolve_token_from_env() {
        let var = "TELEGRAM_CONNECTOR_TEST_TOKEN_RESOLVE";
        std::env::set_var(var, "987654321:from-env-token");
        let config = TelegramConfig {
            bot_token_env: var.to_string(),
            ..Default::default()
        };
        let token = config.resolve_token().unwrap();
        assert_eq!(token.expose(), "987654321:from-env-token");
        std::env::remove_var(var);
    }

    #[test]
    fn test_missing_token() {
        let config = TelegramConfig {
            bot_token_env: "TELEGRAM_CONNECTOR_TEST_TOKEN_UNSET".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.resolve_token(), Err(Error::Config(_))));
    }

    #[test]
    fn test_render_omits_empty_token() {
        let rendered = ConnectorConfig::default().to_toml().unwrap();
        assert!(!rendered.contains("bot_token ="));
        assert!(rendered.contains("bot_token_env"));
        let parsed = ConnectorConfig::from_toml(&rendered).unwrap();
        assert_eq!(parsed.server.port, 18791);
    }
}
