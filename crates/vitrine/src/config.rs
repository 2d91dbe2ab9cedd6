//! Site configuration (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use vitrine_site::BuildConfig;

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Absolute origin used for share links
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentSection {
    #[serde(default = "default_content_dir")]
    pub dir: String,
    /// Directory holding the self-contained HTML assets
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            base_url: default_base_url(),
            site_url: default_site_url(),
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            minify: default_minify(),
        }
    }
}

fn default_title() -> String {
    "Vitrine".to_string()
}
fn default_description() -> String {
    "Interactive content viewer".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_site_url() -> String {
    "http://127.0.0.1:4000".to_string()
}
fn default_content_dir() -> String {
    "content".to_string()
}
fn default_assets_dir() -> String {
    "html-files".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_minify() -> bool {
    true
}

/// Load configuration from the given path if it exists.
///
/// A missing file yields defaults; a malformed file is an error.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// Turn the file configuration into a build configuration.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            content_dir: PathBuf::from(&self.content.dir),
            assets_dir: PathBuf::from(&self.content.assets_dir),
            output_dir: PathBuf::from(&self.build.output),
            minify: self.build.minify,
            base_url: self.site.base_url.clone(),
            site_url: self.site.site_url.clone(),
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            reload_script: None,
        }
    }
}
