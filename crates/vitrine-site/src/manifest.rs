//! Asset manifest generation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Listing of the HTML assets available to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// When the manifest was generated (RFC 3339, UTC)
    pub generated: String,

    /// Number of listed files
    pub count: usize,

    /// Sorted asset filenames
    pub files: Vec<String>,
}

impl Manifest {
    /// Build a manifest over the HTML files in `dir`.
    pub fn generate(dir: &Path) -> Result<Self, ManifestError> {
        let files = scan_assets(dir)?;

        Ok(Self {
            generated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            count: files.len(),
            files,
        })
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(ManifestError::Serialize)
    }
}

/// List the asset files in `dir`, direct children only.
///
/// Keeps `.html` files whose name does not contain `index` (the generated
/// page documents are not assets), sorted by name.
pub fn scan_assets(dir: &Path) -> Result<Vec<String>, ManifestError> {
    let mut files = Vec::new();

    let reader = fs::read_dir(dir).map_err(|e| ManifestError::Read {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for item in reader {
        let item = item.map_err(|e| ManifestError::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;

        if !item.path().is_file() {
            continue;
        }

        let Some(name) = item.file_name().to_str().map(String::from) else {
            continue;
        };

        if name.ends_with(".html") && !name.contains("index") {
            files.push(name);
        }
    }

    files.sort();

    Ok(files)
}

/// Generate and write `manifest.json` into `dir`, returning the manifest.
pub fn write_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let manifest = Manifest::generate(dir)?;
    let json = manifest.to_json()?;

    let path = dir.join("manifest.json");
    fs::write(&path, json).map_err(|e| ManifestError::Write {
        path,
        source: e,
    })?;

    Ok(manifest)
}

/// Errors that can occur generating the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read asset directory {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_html_files_excluding_index_and_non_html() {
        let temp = tempdir().unwrap();
        for name in ["b.html", "a.html", "index.html", "notes.txt"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }

        let files = scan_assets(temp.path()).unwrap();

        assert_eq!(files, vec!["a.html".to_string(), "b.html".to_string()]);
    }

    #[test]
    fn skips_subdirectories() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("top.html"), "x").unwrap();
        let sub = temp.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("deep.html"), "x").unwrap();

        let files = scan_assets(temp.path()).unwrap();

        assert_eq!(files, vec!["top.html".to_string()]);
    }

    #[test]
    fn excludes_any_name_containing_index() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "x").unwrap();
        fs::write(temp.path().join("price-index.html"), "x").unwrap();
        fs::write(temp.path().join("chart.html"), "x").unwrap();

        let files = scan_assets(temp.path()).unwrap();

        assert_eq!(files, vec!["chart.html".to_string()]);
    }

    #[test]
    fn writes_manifest_json() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.html"), "x").unwrap();
        fs::write(temp.path().join("b.html"), "x").unwrap();

        let manifest = write_manifest(temp.path()).unwrap();

        assert_eq!(manifest.count, 2);
        assert_eq!(manifest.files, vec!["a.html", "b.html"]);

        let written = fs::read_to_string(temp.path().join("manifest.json")).unwrap();
        let parsed: Manifest = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, manifest);
        // RFC 3339 UTC timestamp
        assert!(parsed.generated.ends_with('Z'));
    }

    #[test]
    fn missing_directory_errors() {
        let temp = tempdir().unwrap();

        let result = scan_assets(&temp.path().join("absent"));

        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }
}
