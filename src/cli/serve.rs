//! Serve command implementation

use std::sync::Arc;

use anyhow::{Context, Result};

use natasha::gateway::server::{GatewayServer, SystemBackend};
use natasha::launcher::SystemLauncher;

use super::Overrides;

/// Run the reference Action Gateway until the process is stopped
pub async fn serve_command(overrides: &Overrides, bind: Option<String>) -> Result<()> {
    let config = overrides.load_config()?;
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());

    let backend = Arc::new(SystemBackend::from_config(&config, Arc::new(SystemLauncher)));
    let server = GatewayServer::start(&bind, backend)?;
    println!("Action Gateway running at {}", server.url());

    tokio::task::spawn_blocking(move || server.wait())
        .await
        .context("Gateway server thread failed")?;

    Ok(())
}
