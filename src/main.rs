// This is the entry point of the Google Workspace MCP server.
//
// **Architecture Overview:**
// - `core/` = Business logic (config, session state, tool dispatch envelope)
// - `infra/` = Implementations of core traits (Google REST client, OAuth)
// - `mcp/` = MCP-specific adapters (tool schemas, stdio server)
//
// This file's job is to:
// 1. Set up logging (stderr, since stdout carries the protocol)
// 2. Load configuration
// 3. Initialize services (dependency injection)
// 4. Serve tools over stdio until the client disconnects or we are told to stop

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "mcp/mcp_layer.rs"]
mod mcp;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::workspace::{WorkspaceApi, WorkspaceService};
use crate::infra::google::{token_provider_from_config, GoogleWorkspaceClient};
use crate::mcp::WorkspaceMcp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Missing credentials or folders are fatal; there is nothing to serve without them.
    let config = Arc::new(Config::from_env()?);

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let auth = token_provider_from_config(&config).await?;
    let client: Box<dyn WorkspaceApi> = Box::new(GoogleWorkspaceClient::new(auth));
    let service = WorkspaceService::new(client, config);
    let server = WorkspaceMcp::new(service);

    tracing::info!("Starting MCP server on stdio");

    tokio::select! {
        result = server.serve_stdio() => {
            result?;
            tracing::info!("Client disconnected, shutting down");
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal, shutting down");
        }
    }

    Ok(())
}

/// Resolves on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
