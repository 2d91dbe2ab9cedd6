//! Content entry model.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::frontmatter::{extract_frontmatter, FrontmatterError};

/// One unit of content: metadata plus a markdown body, optionally referencing
/// a self-contained HTML asset. Immutable once loaded for a build.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// URL-safe identifier, unique across the collection
    pub slug: String,

    /// Entry title
    pub title: String,

    /// Short description shown in listings
    pub description: Option<String>,

    /// Free-text grouping label
    pub category: Option<String>,

    /// Publish date
    pub publish_date: Option<NaiveDate>,

    /// Author byline
    pub author: Option<String>,

    /// Filename of the referenced HTML asset
    pub asset_file: Option<String>,

    /// Markdown body below the front matter
    pub body: String,
}

impl ContentEntry {
    /// Parse an entry from content file source.
    ///
    /// The file must carry front matter with at least `slug` and `title`.
    pub fn from_source(source: &str) -> Result<Self, EntryError> {
        let (frontmatter, body) = extract_frontmatter(source)?;
        let fm = frontmatter.ok_or(EntryError::MissingFrontmatter)?;

        let publish_date = match fm.publish_date {
            Some(raw) => Some(parse_publish_date(&raw)?),
            None => None,
        };

        Ok(Self {
            slug: fm.slug,
            title: fm.title,
            description: fm.description,
            category: fm.category,
            publish_date,
            author: fm.author,
            asset_file: fm.html_file,
            body: body.to_string(),
        })
    }

    /// The entry's category, if it has a usable one.
    ///
    /// A missing or whitespace-only category counts as no category: such
    /// entries are excluded from category derivation.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

/// Parse a publish date from front matter.
///
/// Accepts `YYYY-MM-DD` or any string with an ISO date prefix (a full
/// timestamp like `2025-07-11T06:00:00.000Z` is common when content is
/// exported from other systems). Anything else is an error.
pub fn parse_publish_date(input: &str) -> Result<NaiveDate, EntryError> {
    static ISO_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = ISO_PREFIX.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("ISO date pattern is valid")
    });

    let trimmed = input.trim();

    if let Some(caps) = re.captures(trimmed) {
        let year: i32 = caps[1].parse().expect("matched digits");
        let month: u32 = caps[2].parse().expect("matched digits");
        let day: u32 = caps[3].parse().expect("matched digits");

        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| EntryError::InvalidDate {
            value: input.to_string(),
        });
    }

    Err(EntryError::InvalidDate {
        value: input.to_string(),
    })
}

/// Errors that can occur when loading an entry.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("Entry has no front matter block")]
    MissingFrontmatter,

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error("Invalid publish date: {value:?}")]
    InvalidDate { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_entry() {
        let source = r#"---
slug: river-levels
title: River Levels
description: Streamflow gauges across the state
category: Environment
publishDate: 2025-07-11
author: Jane Doe
htmlFile: river-levels.html
---

# River Levels

Gauge data updates hourly.
"#;

        let entry = ContentEntry::from_source(source).unwrap();

        assert_eq!(entry.slug, "river-levels");
        assert_eq!(entry.title, "River Levels");
        assert_eq!(entry.category(), Some("Environment"));
        assert_eq!(
            entry.publish_date,
            Some(NaiveDate::from_ymd_opt(2025, 7, 11).unwrap())
        );
        assert_eq!(entry.asset_file, Some("river-levels.html".to_string()));
        assert!(entry.body.starts_with("# River Levels"));
    }

    #[test]
    fn rejects_entry_without_frontmatter() {
        let result = ContentEntry::from_source("# No metadata here");

        assert!(matches!(result, Err(EntryError::MissingFrontmatter)));
    }

    #[test]
    fn whitespace_category_counts_as_none() {
        let source = "---\nslug: a\ntitle: A\ncategory: \"   \"\n---\nBody";

        let entry = ContentEntry::from_source(source).unwrap();

        assert!(entry.category.is_some());
        assert_eq!(entry.category(), None);
    }

    #[test]
    fn parses_plain_iso_date() {
        let date = parse_publish_date("2025-07-11").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 11).unwrap());
    }

    #[test]
    fn parses_timestamp_by_iso_prefix() {
        let date = parse_publish_date("2025-07-11T06:00:00.000Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 11).unwrap());
    }

    #[test]
    fn rejects_non_date_strings() {
        assert!(matches!(
            parse_publish_date("next tuesday"),
            Err(EntryError::InvalidDate { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_dates() {
        assert!(matches!(
            parse_publish_date("2025-13-40"),
            Err(EntryError::InvalidDate { .. })
        ));
    }
}
