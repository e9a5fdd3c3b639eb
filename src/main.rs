//! telegram-connector - Telegram Bot API connector for host platforms
//!
//! Runs the connector as an HTTP service, or calls its operations directly
//! from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use telegram_connector::{
    config::{ConnectorConfig, CONFIG_ENV},
    connector::connector_manifest,
    server,
    telegram::{ParseMode, SendMessageRequest},
    TelegramConnector,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "telegram-connector")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Telegram Bot API connector for low-code backends")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the operations API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Send a text message
    Send {
        /// Target chat ID or @channelusername
        #[arg(short = 't', long)]
        chat_id: String,

        /// Message text
        #[arg(short = 'm', long)]
        text: String,

        /// Markdown, MarkdownV2, HTML or none
        #[arg(long)]
        parse_mode: Option<String>,

        /// Disable link previews
        #[arg(long)]
        disable_web_page_preview: bool,

        /// Send silently
        #[arg(long)]
        disable_notification: bool,

        /// Message ID to reply to
        #[arg(long)]
        reply_to: Option<i64>,
    },

    /// Invoke an operation with JSON parameters
    Invoke {
        /// Operation name, e.g. sendMessage
        operation: String,

        /// Parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },

    /// Print the operation catalog
    Manifest,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("telegram_connector={},tower_http=info", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConnectorConfig::discover(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            run_server(&config, &host, port).await?;
        }
        Commands::Send {
            chat_id,
            text,
            parse_mode,
            disable_web_page_preview,
            disable_notification,
            reply_to,
        } => {
            let parse_mode = match parse_mode.as_deref() {
                Some(mode) => ParseMode::parse_optional(mode)?,
                None => None,
            };
            let request = SendMessageRequest::new(chat_id, text)
                .parse_mode(parse_mode)
                .disable_web_page_preview(disable_web_page_preview.then_some(true))
                .disable_notification(disable_notification.then_some(true))
                .reply_to_message_id(reply_to);

            let connector = TelegramConnector::from_config(&config.telegram)?;
            let response = connector.sender().send(&request).await?;
            println!("{}", serde_json::to_string_pretty(response.as_value())?);
        }
        Commands::Invoke { operation, params } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).context("--params must be a JSON object")?;
            let connector = TelegramConnector::from_config(&config.telegram)?;
            let result = connector.invoke(&operation, params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Manifest => {
            println!("{}", serde_json::to_string_pretty(&connector_manifest())?);
        }
        Commands::Config { default } => {
            let shown = if default {
                ConnectorConfig::default()
            } else {
                config
            };
            println!("{}", shown.to_toml()?);
        }
    }

    Ok(())
}

async fn run_server(config: &ConnectorConfig, host: &str, port: u16) -> Result<()> {
    tracing::info!("Starting Telegram connector");

    let connector = Arc::new(TelegramConnector::from_config(&config.telegram)?);
    server::serve(connector, host, port, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutting down...");
    })
    .await?;

    Ok(())
}
