//! Development server command.

use std::path::Path;

use anyhow::Result;
use vitrine_server::{DevServer, DevServerConfig};

use crate::config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = config::load(config_path)?;

    let config = DevServerConfig {
        build: file_config.build_config(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
