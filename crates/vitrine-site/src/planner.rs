//! Page planning: deriving the full page set from the entry collection.

use std::collections::BTreeMap;

use vitrine_content::{slugify_category, ContentEntry};

/// What kind of output page a planned page is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Full entry view at `/view/{slug}`
    Detail,
    /// Chrome-less share view at `/share/{slug}`
    Share,
    /// Editor mock at `/edit/{slug}`
    Edit,
    /// Single-category listing at `/category/{slug}`
    Category,
    /// All-categories overview at `/categories`
    CategoryIndex,
}

/// One distinct category with its entry count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategorySummary {
    /// Category name as written in front matter
    pub name: String,
    /// Derived URL slug
    pub slug: String,
    /// Number of entries whose category equals `name` exactly
    pub count: usize,
}

/// Data a planned page carries into rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContext {
    /// The entry behind a detail/share/edit page
    Entry(ContentEntry),
    /// The category behind a category page
    Category { name: String, slug: String },
    /// Every category summary, for the index page
    CategoryIndex(Vec<CategorySummary>),
}

/// An abstract description of one output page prior to rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    /// Site-relative path, e.g. `/view/wildfire-tracker`
    pub path: String,
    pub kind: PageKind,
    pub context: PageContext,
}

/// Errors that can occur during planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(
        "Categories {first:?} and {second:?} both map to slug {slug:?}; \
         rename one so each category routes to a distinct path"
    )]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}

/// Compute the derived page set for a content collection.
///
/// A pure function over the entry list: for N entries with K distinct
/// non-empty categories it emits exactly 3N + K + 1 pages, in a
/// deterministic order (entry pages in input order, category pages sorted by
/// name, index last). Entries without a category get their three pages but
/// contribute nothing to category derivation.
///
/// Two distinct category names normalizing to the same slug are rejected:
/// silently letting one overwrite the other's route would drop a category
/// from the site.
pub fn plan_pages(entries: &[ContentEntry]) -> Result<Vec<PlannedPage>, PlanError> {
    let mut pages = Vec::with_capacity(entries.len() * 3 + 1);

    for entry in entries {
        pages.push(PlannedPage {
            path: format!("/view/{}", entry.slug),
            kind: PageKind::Detail,
            context: PageContext::Entry(entry.clone()),
        });
        pages.push(PlannedPage {
            path: format!("/share/{}", entry.slug),
            kind: PageKind::Share,
            context: PageContext::Entry(entry.clone()),
        });
        pages.push(PlannedPage {
            path: format!("/edit/{}", entry.slug),
            kind: PageKind::Edit,
            context: PageContext::Entry(entry.clone()),
        });
    }

    let summaries = category_summaries(entries)?;

    for summary in &summaries {
        pages.push(PlannedPage {
            path: format!("/category/{}", summary.slug),
            kind: PageKind::Category,
            context: PageContext::Category {
                name: summary.name.clone(),
                slug: summary.slug.clone(),
            },
        });
    }

    pages.push(PlannedPage {
        path: "/categories".to_string(),
        kind: PageKind::CategoryIndex,
        context: PageContext::CategoryIndex(summaries),
    });

    Ok(pages)
}

/// Derive the distinct categories with per-category entry counts.
///
/// Counts use exact string equality on the category value, not slug
/// equality. Sorted by name.
pub fn category_summaries(entries: &[ContentEntry]) -> Result<Vec<CategorySummary>, PlanError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        if let Some(category) = entry.category() {
            *counts.entry(category).or_default() += 1;
        }
    }

    let mut by_slug: BTreeMap<String, &str> = BTreeMap::new();
    let mut summaries = Vec::with_capacity(counts.len());

    for (name, count) in counts {
        let slug = slugify_category(name);

        if let Some(first) = by_slug.insert(slug.clone(), name) {
            return Err(PlanError::SlugCollision {
                slug,
                first: first.to_string(),
                second: name.to_string(),
            });
        }

        summaries.push(CategorySummary {
            name: name.to_string(),
            slug,
            count,
        });
    }

    Ok(summaries)
}
