//! Content store: directory scanning and the all-entries query.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::entry::{ContentEntry, EntryError};

/// The loaded content collection for one build.
///
/// Created by scanning the content directory at build start; the collection
/// is an immutable snapshot passed explicitly to the planner rather than
/// held in shared mutable state.
#[derive(Debug, Clone)]
pub struct ContentStore {
    entries: Vec<ContentEntry>,
}

impl ContentStore {
    /// Scan a directory tree for `.mdx`/`.md` files and load every entry.
    ///
    /// Fail-fast: a missing directory, an unreadable file, malformed front
    /// matter, or a duplicate slug aborts the whole load. No partial
    /// collection is ever returned.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        if !dir.exists() {
            return Err(StoreError::NotFound(dir.to_path_buf()));
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for item in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = item.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|e| StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;

            let entry = ContentEntry::from_source(&source).map_err(|e| StoreError::Entry {
                path: path.to_path_buf(),
                source: e,
            })?;

            if let Some(first) = seen.insert(entry.slug.clone(), path.to_path_buf()) {
                return Err(StoreError::DuplicateSlug {
                    slug: entry.slug,
                    first,
                    second: path.to_path_buf(),
                });
            }

            entries.push(entry);
        }

        // Newest first, slug as tie-break, undated entries last. Every
        // downstream artifact inherits this order, which keeps repeated
        // builds over an unchanged collection byte-identical.
        entries.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        tracing::debug!("Loaded {} entries from {}", entries.len(), dir.display());

        Ok(Self { entries })
    }

    /// All entries, in store order.
    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Look up a single entry by slug.
    pub fn get(&self, slug: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors that can occur when loading the content store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Content directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load {path}: {source}")]
    Entry { path: PathBuf, source: EntryError },

    #[error("Duplicate slug {slug:?} in {second} (first defined in {first})", first = .first.display(), second = .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_entry(dir: &Path, name: &str, slug: &str, date: &str) {
        let source = format!(
            "---\nslug: {slug}\ntitle: {slug}\npublishDate: {date}\n---\nBody of {slug}.\n"
        );
        fs::write(dir.join(name), source).unwrap();
    }

    #[test]
    fn loads_entries_newest_first() {
        let temp = tempdir().unwrap();
        write_entry(temp.path(), "a.mdx", "older", "2025-01-05");
        write_entry(temp.path(), "b.mdx", "newer", "2025-06-01");

        let store = ContentStore::load(temp.path()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].slug, "newer");
        assert_eq!(store.entries()[1].slug, "older");
    }

    #[test]
    fn scans_subdirectories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("2025");
        fs::create_dir_all(&nested).unwrap();
        write_entry(&nested, "deep.mdx", "deep", "2025-03-01");

        let store = ContentStore::load(temp.path()).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("deep").is_some());
    }

    #[test]
    fn ignores_non_content_files() {
        let temp = tempdir().unwrap();
        write_entry(temp.path(), "real.mdx", "real", "2025-02-02");
        fs::write(temp.path().join("notes.txt"), "not content").unwrap();

        let store = ContentStore::load(temp.path()).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");

        let result = ContentStore::load(&missing);

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn malformed_entry_aborts_load() {
        let temp = tempdir().unwrap();
        write_entry(temp.path(), "good.mdx", "good", "2025-02-02");
        fs::write(temp.path().join("bad.mdx"), "---\ntitle: [broken\n---\n").unwrap();

        let result = ContentStore::load(temp.path());

        assert!(matches!(result, Err(StoreError::Entry { .. })));
    }

    #[test]
    fn duplicate_slug_aborts_load() {
        let temp = tempdir().unwrap();
        write_entry(temp.path(), "one.mdx", "same", "2025-02-02");
        write_entry(temp.path(), "two.mdx", "same", "2025-02-03");

        let result = ContentStore::load(temp.path());

        assert!(matches!(result, Err(StoreError::DuplicateSlug { .. })));
    }

    #[test]
    fn load_is_deterministic() {
        let temp = tempdir().unwrap();
        write_entry(temp.path(), "a.mdx", "alpha", "2025-04-01");
        write_entry(temp.path(), "b.mdx", "beta", "2025-04-01");
        write_entry(temp.path(), "c.mdx", "gamma", "2025-05-01");

        let first = ContentStore::load(temp.path()).unwrap();
        let second = ContentStore::load(temp.path()).unwrap();

        assert_eq!(first.entries(), second.entries());
    }
}
