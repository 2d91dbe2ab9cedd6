//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use vitrine_site::SiteBuilder;

use crate::config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building site...");

    let file_config = config::load(config_path)?;

    let mut build = file_config.build_config();
    if let Some(output) = output {
        build.output_dir = output;
    }
    if let Some(minify) = minify {
        build.minify = minify;
    }

    let result = SiteBuilder::new(build).build().await?;

    tracing::info!(
        "Built {} pages from {} entries ({} categories) in {}ms",
        result.pages,
        result.entries,
        result.categories,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
