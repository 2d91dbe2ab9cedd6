//! Asset manifest command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use vitrine_site::write_manifest;

use crate::config;

/// Run the manifest command.
///
/// Writes `manifest.json` into the asset directory, listing the HTML files
/// available to the viewer.
pub async fn run(config_path: &Path, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => {
            let file_config = config::load(config_path)?;
            PathBuf::from(&file_config.content.assets_dir)
        }
    };

    let manifest = write_manifest(&dir)?;

    tracing::info!(
        "Generated manifest with {} HTML file(s) in {}",
        manifest.count,
        dir.display()
    );

    Ok(())
}
