//! HTTP surface for host platforms that call the connector over the network

mod handler;

pub use handler::{operations_router, OperationsState};

use crate::connector::TelegramConnector;
use crate::error::Result;
use std::sync::Arc;

/// Bind and serve until `shutdown` resolves
pub async fn serve<F>(
    connector: Arc<TelegramConnector>,
    host: &str,
    port: u16,
    shutdown: F,
) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = operations_router(OperationsState { connector });
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Telegram connector listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Telegram connector stopped");
    Ok(())
}
