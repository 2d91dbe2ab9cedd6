//! Static site generation for vitrine.
//!
//! Turns a loaded content collection into a published site: the page planner
//! derives the full page set (view, share, edit, category, category index),
//! the builder renders each planned page through templates, processes
//! embedded HTML assets, and writes the asset manifest.

pub mod assets;
pub mod builder;
pub mod manifest;
pub mod planner;
pub mod substitute;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use manifest::{scan_assets, write_manifest, Manifest, ManifestError};
pub use planner::{
    category_summaries, plan_pages, CategorySummary, PageContext, PageKind, PlanError,
    PlannedPage,
};
pub use substitute::{format_long_date, substitute_placeholders};
