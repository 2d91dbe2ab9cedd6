//! Template engine for rendering viewer pages.

use minijinja::Environment;
use serde::Serialize;

use vitrine_content::{slugify_category, ContentEntry};

use crate::substitute::format_long_date;

/// Site-wide metadata available to every template.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    /// Site title
    pub title: String,
    /// Site description
    pub description: String,
    /// Base URL for internal links, e.g. `/`
    pub base_url: String,
    /// Absolute origin for share links, e.g. `https://extras.example.com`
    pub site_url: String,
    /// Live-reload script injected into every page by the dev server
    pub reload_script: Option<String>,
}

/// An entry prepared for template consumption.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub category_slug: Option<String>,
    /// Long display date, e.g. `Friday, July 11, 2025`
    pub publish_date: Option<String>,
    /// ISO form of the publish date
    pub publish_date_iso: Option<String>,
    pub author: Option<String>,
    pub asset_file: Option<String>,
}

impl EntryView {
    pub fn from_entry(entry: &ContentEntry) -> Self {
        Self {
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            category: entry.category().map(String::from),
            category_slug: entry.category().map(slugify_category),
            publish_date: entry.publish_date.map(format_long_date),
            publish_date_iso: entry.publish_date.map(|d| d.format("%Y-%m-%d").to_string()),
            author: entry.author.clone(),
            asset_file: entry.asset_file.clone(),
        }
    }
}

/// A category card on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCard {
    pub name: String,
    pub slug: String,
    pub count: usize,
    pub emoji: &'static str,
    pub color: &'static str,
}

/// Badge emoji and card color class for a category name.
///
/// Unknown categories fall back to the default style rather than erroring.
pub fn category_style(name: &str) -> (&'static str, &'static str) {
    match name {
        "Elections" => ("\u{1F5F3}\u{FE0F}", "card-blue"),
        "Newsletters" => ("\u{2709}\u{FE0F}", "card-blue"),
        "Economy" => ("\u{1F4CA}", "card-green"),
        "Environment" => ("\u{1F33F}", "card-emerald"),
        "Health" => ("\u{1F3E5}", "card-red"),
        "Education" => ("\u{1F4DA}", "card-purple"),
        "Sports" => ("\u{26BD}", "card-orange"),
        _ => ("\u{1F4F0}", "card-gray"),
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        let templates = [
            ("base.html", BASE_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("detail.html", DETAIL_TEMPLATE),
            ("share.html", SHARE_TEMPLATE),
            ("edit.html", EDIT_TEMPLATE),
            ("category.html", CATEGORY_TEMPLATE),
            ("category_index.html", CATEGORY_INDEX_TEMPLATE),
            ("not_found.html", NOT_FOUND_TEMPLATE),
            ("embed_error.html", EMBED_ERROR_TEMPLATE),
        ];

        for (name, source) in templates {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("built-in template is valid");
        }

        Self { env }
    }

    /// Render a named template with the given context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(ctx)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ site.title }}{% endblock %}</title>
  <meta name="description" content="{{ site.description }}">
  <link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
</head>
<body>
  <header class="site-header">
    <a href="{{ site.base_url }}" class="site-logo">{{ site.title }}</a>
    <nav class="site-nav">
      <a href="{{ site.base_url }}">Home</a>
      <a href="{{ site.base_url }}categories/">Categories</a>
    </nav>
  </header>
  <main>
  {% block content %}{% endblock %}
  </main>
  <footer class="site-footer">
    <p>{{ site.description }}</p>
  </footer>
  <script src="{{ site.base_url }}assets/main.js"></script>
  {% if site.reload_script %}<script src="{{ site.reload_script }}"></script>{% endif %}
</body>
</html>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="hero">
  <h1>{{ site.title }}</h1>
  <p>{{ site.description }}</p>
</div>

<div class="entry-list">
{% for entry in entries %}
  <div class="entry-card">
    <h2>{{ entry.title }}</h2>
    {% if entry.description %}<p class="entry-description">{{ entry.description }}</p>{% endif %}
    <div class="entry-meta">
      {% if entry.publish_date %}<span>Published: {{ entry.publish_date }}</span>{% endif %}
      {% if entry.category %}
      <a class="entry-category" href="{{ site.base_url }}category/{{ entry.category_slug }}/">{{ entry.category }}</a>
      {% endif %}
    </div>
    <div class="entry-actions">
      <a class="button button-primary" href="{{ site.base_url }}view/{{ entry.slug }}/">View</a>
      <a class="button button-secondary" href="{{ site.base_url }}edit/{{ entry.slug }}/">Edit</a>
    </div>
  </div>
{% else %}
  <p class="empty-state">No entries yet.</p>
{% endfor %}
</div>
{% endblock %}"##;

const DETAIL_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ entry.title }} - {{ site.title }}{% endblock %}

{% block content %}
<article class="viewer">
  <div class="viewer-toolbar">
    <h1>{{ entry.title }}</h1>
    <div class="viewer-actions">
      <button class="button button-secondary" type="button" data-copy-link="{{ share_url }}">Copy share link</button>
      <a class="button button-secondary" href="{{ site.base_url }}edit/{{ entry.slug }}/">Edit</a>
    </div>
  </div>

  <aside class="viewer-meta">
    {% if entry.publish_date %}
    <p><strong>Published:</strong>
      <time datetime="{{ entry.publish_date_iso }}">{{ entry.publish_date }}</time></p>
    {% endif %}
    {% if entry.author %}<p><strong>Author:</strong> {{ entry.author }}</p>{% endif %}
    {% if entry.category %}
    <p><strong>Category:</strong>
      <a href="{{ site.base_url }}category/{{ entry.category_slug }}/">{{ entry.category }}</a></p>
    {% endif %}
    <p><strong>Share:</strong> <a href="{{ share_url }}">{{ share_url }}</a></p>
  </aside>

  {% if entry.asset_file %}
  <div class="embed-frame">
    <iframe src="{{ site.base_url }}embed/{{ entry.slug }}/"
            title="{{ entry.title }}"
            sandbox="allow-scripts allow-same-origin"></iframe>
  </div>
  {% else %}
  <div class="embed-empty">No HTML file specified</div>
  {% endif %}

  <div class="viewer-body">
    {{ body_html | safe }}
  </div>
</article>
{% endblock %}"##;

const SHARE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ entry.title }}</title>
  {% if entry.description %}<meta name="description" content="{{ entry.description }}">{% endif %}
  <meta property="og:type" content="article">
  <meta property="og:title" content="{{ entry.title }}">
  {% if entry.description %}<meta property="og:description" content="{{ entry.description }}">{% endif %}
  <meta property="og:url" content="{{ share_url }}">
  <meta property="og:site_name" content="{{ site.title }}">
  <link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
</head>
<body class="share-page">
  <header class="share-header">
    <h1>{{ entry.title }}</h1>
    {% if entry.publish_date %}<p>{{ entry.publish_date }}</p>{% endif %}
  </header>
  {% if entry.asset_file %}
  <div class="embed-frame embed-frame-full">
    <iframe src="{{ site.base_url }}embed/{{ entry.slug }}/"
            title="{{ entry.title }}"
            sandbox="allow-scripts allow-same-origin"></iframe>
  </div>
  {% else %}
  <div class="embed-empty">No HTML file specified</div>
  {% endif %}
  {% if site.reload_script %}<script src="{{ site.reload_script }}"></script>{% endif %}
</body>
</html>"##;

const EDIT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}Edit: {{ entry.title }} - {{ site.title }}{% endblock %}

{% block content %}
<div class="editor">
  <div class="editor-toolbar">
    <a href="{{ site.base_url }}view/{{ entry.slug }}/">&larr; Back to View</a>
    <h1>Editing: {{ entry.title }}</h1>
    <button class="button button-primary" type="button" data-demo-save>Save</button>
  </div>
  <textarea class="editor-source" spellcheck="false">{{ source }}</textarea>
  <p class="editor-note">Demo only - changes are not written anywhere.</p>
</div>
{% endblock %}"##;

const CATEGORY_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ category.name }} - {{ site.title }}{% endblock %}

{% block content %}
<div class="category-layout">
  <aside class="category-sidebar">
    <h2>Categories</h2>
    <nav>
    {% for cat in all_categories %}
      <a class="category-link{% if cat.slug == category.slug %} active{% endif %}"
         href="{{ site.base_url }}category/{{ cat.slug }}/">{{ cat.name }}</a>
    {% endfor %}
    </nav>
    <a class="category-back" href="{{ site.base_url }}categories/">&larr; All Categories</a>
  </aside>

  <div class="category-main">
    <h1>{{ category.name }}</h1>
    <p class="category-count">{{ posts | length }} interactive{% if posts | length != 1 %}s{% endif %}</p>

    {% for entry in posts %}
    <div class="entry-card">
      <h2><a href="{{ site.base_url }}view/{{ entry.slug }}/">{{ entry.title }}</a></h2>
      {% if entry.description %}<p class="entry-description">{{ entry.description }}</p>{% endif %}
      <div class="entry-meta">
        {% if entry.author %}<span>{{ entry.author }}</span>{% endif %}
        {% if entry.publish_date %}<span>{{ entry.publish_date }}</span>{% endif %}
      </div>
    </div>
    {% else %}
    <p class="empty-state">No entries in this category.</p>
    {% endfor %}
  </div>
</div>
{% endblock %}"##;

const CATEGORY_INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}Categories - {{ site.title }}{% endblock %}

{% block content %}
<div class="category-index">
  <div class="category-index-header">
    <h1>Categories</h1>
    <p>Browse interactive visualizations by topic</p>
  </div>

  <div class="category-grid">
  {% for category in categories %}
    <a class="category-card {{ category.color }}"
       href="{{ site.base_url }}category/{{ category.slug }}/">
      <div class="category-emoji">{{ category.emoji }}</div>
      <h2>{{ category.name }}</h2>
      <p>{{ category.count }} interactive{% if category.count != 1 %}s{% endif %}</p>
    </a>
  {% endfor %}
  </div>

  {% if not categories %}
  <div class="empty-state">
    <p>No categories yet.</p>
    <p>Add some entries to the content directory to get started.</p>
  </div>
  {% endif %}
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}Not Found - {{ site.title }}{% endblock %}

{% block content %}
<div class="not-found">
  <h1>404</h1>
  <p>Page not found.</p>
  <a class="button button-primary" href="{{ site.base_url }}">Back home</a>
</div>
{% endblock %}"##;

const EMBED_ERROR_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Embed unavailable</title>
  <style>
    body { font-family: system-ui, sans-serif; display: flex; align-items: center;
           justify-content: center; min-height: 100vh; margin: 0; background: #fef2f2; }
    .panel { color: #b91c1c; text-align: center; padding: 2rem; }
  </style>
</head>
<body>
  <div class="panel">
    <p><strong>Error:</strong> {{ message }}</p>
  </div>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use minijinja::context;

    fn site() -> SiteMeta {
        SiteMeta {
            title: "Extras".to_string(),
            description: "Interactive content viewer".to_string(),
            base_url: "/".to_string(),
            site_url: "https://extras.example.com".to_string(),
            reload_script: None,
        }
    }

    fn sample_entry() -> ContentEntry {
        ContentEntry {
            slug: "wildfire-tracker".to_string(),
            title: "Wildfire Tracker".to_string(),
            description: Some("Live fire map".to_string()),
            category: Some("Environment".to_string()),
            publish_date: NaiveDate::from_ymd_opt(2025, 7, 11),
            author: Some("Jane Doe".to_string()),
            asset_file: Some("wildfire-tracker.html".to_string()),
            body: "# Fires\n".to_string(),
        }
    }

    #[test]
    fn entry_view_formats_dates_and_slugs() {
        let view = EntryView::from_entry(&sample_entry());

        assert_eq!(view.publish_date.as_deref(), Some("Friday, July 11, 2025"));
        assert_eq!(view.publish_date_iso.as_deref(), Some("2025-07-11"));
        assert_eq!(view.category_slug.as_deref(), Some("environment"));
    }

    #[test]
    fn renders_detail_page() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "detail.html",
                context! {
                    site => site(),
                    entry => EntryView::from_entry(&sample_entry()),
                    body_html => "<p>Body</p>",
                    share_url => "https://extras.example.com/share/wildfire-tracker/",
                },
            )
            .unwrap();

        assert!(html.contains("<title>Wildfire Tracker - Extras</title>"));
        assert!(html.contains("/embed/wildfire-tracker/"));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("https://extras.example.com/share/wildfire-tracker/"));
    }

    #[test]
    fn detail_without_asset_shows_empty_panel() {
        let engine = TemplateEngine::new();
        let mut entry = sample_entry();
        entry.asset_file = None;

        let html = engine
            .render(
                "detail.html",
                context! {
                    site => site(),
                    entry => EntryView::from_entry(&entry),
                    body_html => "",
                    share_url => "",
                },
            )
            .unwrap();

        assert!(html.contains("No HTML file specified"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn renders_category_index_with_style_fallback() {
        let engine = TemplateEngine::new();

        let (emoji, color) = category_style("Something Unmapped");
        assert_eq!(color, "card-gray");

        let cards = vec![CategoryCard {
            name: "Something Unmapped".to_string(),
            slug: "something-unmapped".to_string(),
            count: 2,
            emoji,
            color,
        }];

        let html = engine
            .render(
                "category_index.html",
                context! { site => site(), categories => cards },
            )
            .unwrap();

        assert!(html.contains("card-gray"));
        assert!(html.contains("2 interactives"));
    }

    #[test]
    fn known_categories_have_distinct_styles() {
        assert_eq!(category_style("Health").1, "card-red");
        assert_eq!(category_style("Economy").1, "card-green");
        assert_ne!(category_style("Health"), category_style("Sports"));
    }

    #[test]
    fn renders_empty_category_index() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "category_index.html",
                context! { site => site(), categories => Vec::<CategoryCard>::new() },
            )
            .unwrap();

        assert!(html.contains("No categories yet."));
    }

    #[test]
    fn share_page_is_chromeless() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "share.html",
                context! {
                    site => site(),
                    entry => EntryView::from_entry(&sample_entry()),
                    share_url => "https://extras.example.com/share/wildfire-tracker/",
                },
            )
            .unwrap();

        assert!(html.contains("share-page"));
        assert!(!html.contains("site-nav"));
        assert!(html.contains("og:title"));
    }
}
