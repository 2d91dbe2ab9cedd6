//! Initialize a site in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine site...");

    let content_dir = Path::new("content");

    if content_dir.exists() {
        if !yes {
            tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(content_dir).context("Failed to create content directory")?;
    }

    let config_path = Path::new("site.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write site.toml")?;
        tracing::info!("Created site.toml");
    }

    let sample_path = content_dir.join("welcome.mdx");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, SAMPLE_ENTRY).context("Failed to write welcome.mdx")?;
        tracing::info!("Created content/welcome.mdx");
    }

    let assets_dir = Path::new("html-files");
    if !assets_dir.exists() {
        fs::create_dir_all(assets_dir).context("Failed to create html-files directory")?;
    }

    let asset_path = assets_dir.join("welcome.html");
    if !asset_path.exists() || yes {
        fs::write(&asset_path, SAMPLE_ASSET).context("Failed to write welcome.html")?;
        tracing::info!("Created html-files/welcome.html");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vitrine dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Vitrine Configuration

[site]
# Site title shown in the header
title = "My Viewer"

# Site description
description = "Interactive content viewer"

# Base URL for internal links
base_url = "/"

# Absolute origin used for share links
site_url = "http://127.0.0.1:4000"

[content]
# Directory of content entries (.mdx/.md with front matter)
dir = "content"

# Directory of self-contained HTML assets
assets_dir = "html-files"

[build]
# Output directory for the built site
output = "dist"

# Minify CSS output
minify = true
"#;

const SAMPLE_ENTRY: &str = r#"---
slug: welcome
title: Welcome
description: A first entry to get you started
category: Newsletters
publishDate: 2025-07-11
author: The Editors
htmlFile: welcome.html
---

# Welcome

This entry embeds `html-files/welcome.html` below its body.

Each entry gets a view page, a share page, and an edit preview. Entries with
a `category` are grouped on the category pages.
"#;

const SAMPLE_ASSET: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Welcome</title>
  <style>
    body { font-family: Georgia, serif; margin: 2rem; }
  </style>
</head>
<body>
  <h1>Hello!</h1>
  <p>Published %TODAY%.</p>
  %SENDER-INFO-SINGLELINE%
  <p>This is a self-contained HTML asset. The placeholders above are
  rewritten before display.</p>
</body>
</html>
"#;
