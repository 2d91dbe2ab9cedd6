//! Static site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use minijinja::context;
use rayon::prelude::*;

use vitrine_content::{ContentEntry, ContentStore, StoreError};

use crate::assets::AssetPipeline;
use crate::manifest::{write_manifest, Manifest, ManifestError};
use crate::planner::{
    category_summaries, plan_pages, PageContext, PageKind, PlanError, PlannedPage,
};
use crate::substitute::substitute_placeholders;
use crate::templates::{category_style, CategoryCard, EntryView, SiteMeta, TemplateEngine};

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content source directory
    pub content_dir: PathBuf,

    /// Directory holding the self-contained HTML assets
    pub assets_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for internal links
    pub base_url: String,

    /// Absolute origin used for share links
    pub site_url: String,

    /// Site title
    pub title: String,

    /// Site description
    pub description: String,

    /// Live-reload script path injected into pages (set by the dev server)
    pub reload_script: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            assets_dir: PathBuf::from("html-files"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            site_url: "http://127.0.0.1:4000".to_string(),
            title: "Vitrine".to_string(),
            description: "Interactive content viewer".to_string(),
            reload_script: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written
    pub pages: usize,

    /// Number of content entries loaded
    pub entries: usize,

    /// Number of distinct categories
    pub categories: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to load content: {0}")]
    Content(#[from] StoreError),

    #[error("Failed to plan pages: {0}")]
    Plan(#[from] PlanError),

    #[error("Failed to generate manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to read input: {0}")]
    Read(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site.
    ///
    /// Loading and planning are fail-fast: nothing is written unless the
    /// whole content collection loads and plans cleanly. A broken or missing
    /// embed asset is the one isolated failure - the affected embed gets an
    /// error document and the rest of the site still builds.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let store = ContentStore::load(&self.config.content_dir)?;
        let pages = plan_pages(store.entries())?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        // Render planned pages in parallel; each writes a distinct file.
        let results: Vec<Result<(), BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, store.entries()))
            .collect();

        for result in results {
            result?;
        }

        let mut total_pages = pages.len();

        self.build_home(store.entries())?;
        self.build_not_found()?;
        total_pages += 2;

        total_pages += self.build_embeds(store.entries())?;

        let manifest = self.publish_assets()?;
        tracing::debug!("Manifest lists {} asset file(s)", manifest.count);

        self.generate_assets()?;

        let categories = category_summaries(store.entries())?.len();
        let duration = start.elapsed();

        Ok(BuildResult {
            pages: total_pages,
            entries: store.len(),
            categories,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn site_meta(&self) -> SiteMeta {
        SiteMeta {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            base_url: self.config.base_url.clone(),
            site_url: self.config.site_url.clone(),
            reload_script: self.config.reload_script.clone(),
        }
    }

    fn share_url(&self, slug: &str) -> String {
        format!(
            "{}/share/{}/",
            self.config.site_url.trim_end_matches('/'),
            slug
        )
    }

    /// Render one planned page and write it to `{path}/index.html`.
    fn build_page(
        &self,
        page: &PlannedPage,
        entries: &[ContentEntry],
    ) -> Result<(), BuildError> {
        let site = self.site_meta();

        let html = match &page.context {
            PageContext::Entry(entry) => {
                let view = EntryView::from_entry(entry);
                match page.kind {
                    PageKind::Detail => self
                        .templates
                        .render(
                            "detail.html",
                            context! {
                                site => site,
                                entry => view,
                                body_html => render_markdown(&entry.body),
                                share_url => self.share_url(&entry.slug),
                            },
                        )
                        .map_err(|e| BuildError::Template(e.to_string()))?,
                    PageKind::Share => self
                        .templates
                        .render(
                            "share.html",
                            context! {
                                site => site,
                                entry => view,
                                share_url => self.share_url(&entry.slug),
                            },
                        )
                        .map_err(|e| BuildError::Template(e.to_string()))?,
                    _ => self
                        .templates
                        .render(
                            "edit.html",
                            context! {
                                site => site,
                                entry => view,
                                source => editor_source(entry),
                            },
                        )
                        .map_err(|e| BuildError::Template(e.to_string()))?,
                }
            }

            PageContext::Category { name, slug } => {
                let posts: Vec<EntryView> = entries
                    .iter()
                    .filter(|e| e.category() == Some(name.as_str()))
                    .map(EntryView::from_entry)
                    .collect();

                let all_categories = category_summaries(entries)?;

                self.templates
                    .render(
                        "category.html",
                        context! {
                            site => site,
                            category => context! { name => name, slug => slug },
                            posts => posts,
                            all_categories => all_categories,
                        },
                    )
                    .map_err(|e| BuildError::Template(e.to_string()))?
            }

            PageContext::CategoryIndex(summaries) => {
                let cards: Vec<CategoryCard> = summaries
                    .iter()
                    .map(|s| {
                        let (emoji, color) = category_style(&s.name);
                        CategoryCard {
                            name: s.name.clone(),
                            slug: s.slug.clone(),
                            count: s.count,
                            emoji,
                            color,
                        }
                    })
                    .collect();

                self.templates
                    .render(
                        "category_index.html",
                        context! { site => site, categories => cards },
                    )
                    .map_err(|e| BuildError::Template(e.to_string()))?
            }
        };

        self.write_page(&page.path, &html)
    }

    fn build_home(&self, entries: &[ContentEntry]) -> Result<(), BuildError> {
        let views: Vec<EntryView> = entries.iter().map(EntryView::from_entry).collect();

        let html = self
            .templates
            .render(
                "home.html",
                context! { site => self.site_meta(), entries => views },
            )
            .map_err(|e| BuildError::Template(e.to_string()))?;

        self.write_page("/", &html)
    }

    fn build_not_found(&self) -> Result<(), BuildError> {
        let html = self
            .templates
            .render("not_found.html", context! { site => self.site_meta() })
            .map_err(|e| BuildError::Template(e.to_string()))?;

        let path = self.config.output_dir.join("404.html");
        fs::write(&path, html).map_err(|e| BuildError::Write(e.to_string()))
    }

    /// Pre-render processed embed documents for entries with assets.
    ///
    /// A missing or unreadable asset only affects its own embed: that slot
    /// gets an error document and the build continues.
    fn build_embeds(&self, entries: &[ContentEntry]) -> Result<usize, BuildError> {
        let mut written = 0;

        for entry in entries {
            let Some(file) = &entry.asset_file else {
                continue;
            };

            let html = match fs::read_to_string(self.config.assets_dir.join(file)) {
                Ok(raw) => substitute_placeholders(&raw, entry.publish_date),
                Err(e) => {
                    tracing::warn!(
                        "Failed to load HTML file {} for entry {}: {}",
                        file,
                        entry.slug,
                        e
                    );
                    self.templates
                        .render(
                            "embed_error.html",
                            context! { message => format!("Failed to load HTML file: {}", file) },
                        )
                        .map_err(|e| BuildError::Template(e.to_string()))?
                }
            };

            self.write_page(&format!("/embed/{}", entry.slug), &html)?;
            written += 1;
        }

        Ok(written)
    }

    /// Copy the raw asset directory into the output and write its manifest.
    fn publish_assets(&self) -> Result<Manifest, BuildError> {
        let target = self.config.output_dir.join("html-files");
        fs::create_dir_all(&target).map_err(|e| BuildError::Write(e.to_string()))?;

        if self.config.assets_dir.exists() {
            let reader = fs::read_dir(&self.config.assets_dir)
                .map_err(|e| BuildError::Read(e.to_string()))?;

            for item in reader {
                let item = item.map_err(|e| BuildError::Read(e.to_string()))?;
                let path = item.path();
                if path.is_file() {
                    fs::copy(&path, target.join(item.file_name()))
                        .map_err(|e| BuildError::Write(e.to_string()))?;
                }
            }
        } else {
            tracing::warn!(
                "Asset directory not found: {}",
                self.config.assets_dir.display()
            );
        }

        Ok(write_manifest(&target)?)
    }

    /// Generate site CSS and JS.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::Write(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(())
    }

    /// Write a page document at `{site_path}/index.html` under the output dir.
    fn write_page(&self, site_path: &str, html: &str) -> Result<(), BuildError> {
        let relative = site_path.trim_matches('/');
        let dir = if relative.is_empty() {
            self.config.output_dir.clone()
        } else {
            self.config.output_dir.join(relative)
        };

        fs::create_dir_all(&dir).map_err(|e| BuildError::Write(e.to_string()))?;
        fs::write(dir.join("index.html"), html).map_err(|e| BuildError::Write(e.to_string()))
    }
}

/// Render a markdown body to HTML.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Reconstruct an entry's source text for the editor mock.
fn editor_source(entry: &ContentEntry) -> String {
    let mut source = String::from("---\n");
    source.push_str(&format!("slug: {}\n", entry.slug));
    source.push_str(&format!("title: {}\n", entry.title));
    if let Some(description) = &entry.description {
        source.push_str(&format!("description: {}\n", description));
    }
    if let Some(category) = &entry.category {
        source.push_str(&format!("category: {}\n", category));
    }
    if let Some(date) = entry.publish_date {
        source.push_str(&format!("publishDate: {}\n", date.format("%Y-%m-%d")));
    }
    if let Some(author) = &entry.author {
        source.push_str(&format!("author: {}\n", author));
    }
    if let Some(file) = &entry.asset_file {
        source.push_str(&format!("htmlFile: {}\n", file));
    }
    source.push_str("---\n\n");
    source.push_str(&entry.body);
    source
}
