//! Content ingestion for vitrine.
//!
//! This crate loads structured content entries: MDX files carrying YAML front
//! matter (slug, title, category, publish date, referenced HTML asset) plus a
//! markdown body. It provides the entry model, front matter extraction, the
//! category slug function, and the directory scanner that yields the full
//! entry collection for a build.

pub mod entry;
pub mod frontmatter;
pub mod slug;
pub mod store;

pub use entry::{parse_publish_date, ContentEntry, EntryError};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use slug::slugify_category;
pub use store::{ContentStore, StoreError};
