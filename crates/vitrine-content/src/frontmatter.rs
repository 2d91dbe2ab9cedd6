//! Front matter extraction and parsing.

use serde::Deserialize;

/// Parsed front matter from a content file.
///
/// Field names follow the camelCase convention used in the content files
/// themselves (`publishDate`, `htmlFile`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// URL-safe identifier, unique across the collection (required)
    pub slug: String,

    /// Entry title (required)
    pub title: String,

    /// Short description shown in listings
    #[serde(default)]
    pub description: Option<String>,

    /// Free-text grouping label
    #[serde(default)]
    pub category: Option<String>,

    /// Publish date, `YYYY-MM-DD` or any string with an ISO date prefix
    #[serde(default, rename = "publishDate")]
    pub publish_date: Option<String>,

    /// Author byline
    #[serde(default)]
    pub author: Option<String>,

    /// Self-contained HTML asset referenced by this entry
    #[serde(default, rename = "htmlFile")]
    pub html_file: Option<String>,
}

/// Extract front matter from content file source.
///
/// Returns the parsed front matter and the remaining body after the closing
/// fence. Source without a leading `---` fence has no front matter.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = &after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front matter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
slug: wildfire-tracker
title: Wildfire Tracker
description: Live map of active wildfires
category: Environment
publishDate: 2025-07-11
author: Jane Doe
htmlFile: wildfire-tracker.html
---

# Wildfire Tracker
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.slug, "wildfire-tracker");
        assert_eq!(fm.title, "Wildfire Tracker");
        assert_eq!(
            fm.description,
            Some("Live map of active wildfires".to_string())
        );
        assert_eq!(fm.category, Some("Environment".to_string()));
        assert_eq!(fm.publish_date, Some("2025-07-11".to_string()));
        assert_eq!(fm.html_file, Some("wildfire-tracker.html".to_string()));
        assert!(content.starts_with("# Wildfire Tracker"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo front matter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let source = "---\nslug: bare\ntitle: Bare Entry\n---\nBody.";

        let (fm, _) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.category, None);
        assert_eq!(fm.publish_date, None);
        assert_eq!(fm.author, None);
        assert_eq!(fm.html_file, None);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\nslug: x\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
