//! Asset pipeline for CSS and JavaScript output.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Vitrine viewer theme */

:root {
  --accent: #f5b301;
  --ink: #17233b;
  --muted: #6b7280;
  --surface: #ffffff;
  --surface-alt: #f6f7f9;
  --border: #e5e7eb;
  --danger: #b91c1c;
  --content-max-width: 960px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--surface);
  color: var(--ink);
  line-height: 1.6;
}

main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

/* Header and footer */

.site-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 1.5rem;
  background: var(--ink);
}

.site-logo {
  color: var(--accent);
  font-weight: 700;
  font-size: 1.25rem;
  text-decoration: none;
}

.site-nav a {
  color: #ffffff;
  text-decoration: none;
  margin-left: 1.25rem;
}

.site-nav a:hover {
  color: var(--accent);
}

.site-footer {
  border-top: 1px solid var(--border);
  color: var(--muted);
  text-align: center;
  padding: 1.5rem;
  margin-top: 3rem;
}

/* Buttons */

.button {
  display: inline-block;
  padding: 0.5rem 1rem;
  border: none;
  border-radius: 0.375rem;
  font-size: 0.9rem;
  font-weight: 500;
  text-decoration: none;
  cursor: pointer;
}

.button-primary {
  background: var(--accent);
  color: var(--ink);
}

.button-secondary {
  background: var(--surface-alt);
  color: var(--ink);
  border: 1px solid var(--border);
}

/* Home */

.hero {
  background: linear-gradient(to right, var(--ink), #0b1120);
  color: #ffffff;
  text-align: center;
  padding: 3.5rem 1.5rem;
  margin: -2rem -1.5rem 2rem;
}

.hero h1 {
  font-size: 2.5rem;
  margin-bottom: 0.5rem;
}

.hero p {
  color: #d1d5db;
  font-size: 1.125rem;
}

.entry-list {
  display: grid;
  gap: 1.25rem;
}

.entry-card {
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  padding: 1.5rem;
}

.entry-card:hover {
  box-shadow: 0 4px 16px rgba(23, 35, 59, 0.08);
}

.entry-description {
  color: var(--muted);
  margin: 0.5rem 0 1rem;
}

.entry-meta {
  display: flex;
  gap: 1rem;
  color: var(--muted);
  font-size: 0.875rem;
  margin-bottom: 1rem;
}

.entry-category {
  color: var(--ink);
  font-weight: 500;
}

.entry-actions {
  display: flex;
  gap: 0.5rem;
}

/* Viewer */

.viewer-toolbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  margin-bottom: 1rem;
}

.viewer-actions {
  display: flex;
  gap: 0.5rem;
}

.viewer-meta {
  background: var(--surface-alt);
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  padding: 1rem 1.25rem;
  font-size: 0.9rem;
  margin-bottom: 1.5rem;
}

.viewer-body {
  margin-top: 2rem;
}

.viewer-body h1,
.viewer-body h2 {
  margin: 1.5rem 0 0.75rem;
}

.viewer-body p {
  margin-bottom: 1rem;
}

/* Embeds */

.embed-frame {
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  overflow: hidden;
}

.embed-frame iframe {
  display: block;
  width: 100%;
  height: 600px;
  border: 0;
}

.embed-frame-full iframe {
  height: calc(100vh - 8rem);
}

.embed-empty {
  display: flex;
  align-items: center;
  justify-content: center;
  height: 200px;
  background: var(--surface-alt);
  color: var(--muted);
  border-radius: 0.5rem;
}

/* Share */

.share-page {
  background: var(--surface-alt);
}

.share-header {
  text-align: center;
  padding: 1.5rem;
}

.share-header p {
  color: var(--muted);
}

/* Editor */

.editor-toolbar {
  display: flex;
  align-items: center;
  gap: 1rem;
  border-bottom: 1px solid var(--border);
  padding-bottom: 1rem;
  margin-bottom: 1rem;
}

.editor-toolbar h1 {
  font-size: 1.25rem;
  flex: 1;
}

.editor-source {
  width: 100%;
  min-height: 24rem;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
  padding: 1rem;
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  resize: vertical;
}

.editor-note {
  color: var(--muted);
  font-size: 0.8rem;
  margin-top: 0.5rem;
}

/* Categories */

.category-layout {
  display: grid;
  grid-template-columns: 220px 1fr;
  gap: 2rem;
}

.category-sidebar h2 {
  font-size: 1.1rem;
  margin-bottom: 0.75rem;
}

.category-link {
  display: block;
  padding: 0.5rem 0.75rem;
  border-radius: 0.375rem;
  color: var(--muted);
  text-decoration: none;
}

.category-link:hover {
  background: var(--surface-alt);
}

.category-link.active {
  background: var(--accent);
  color: var(--ink);
  font-weight: 500;
}

.category-back {
  display: block;
  margin-top: 1.5rem;
  padding-top: 1.5rem;
  border-top: 1px solid var(--border);
  color: var(--muted);
  font-size: 0.875rem;
  text-decoration: none;
}

.category-count {
  color: var(--muted);
  margin-bottom: 1.5rem;
}

.category-main .entry-card {
  margin-bottom: 1.25rem;
}

.category-index-header {
  text-align: center;
  margin-bottom: 2.5rem;
}

.category-index-header p {
  color: var(--muted);
  font-size: 1.125rem;
}

.category-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1.5rem;
}

.category-card {
  display: block;
  padding: 1.5rem;
  border-radius: 0.75rem;
  border: 2px solid var(--border);
  text-decoration: none;
  color: var(--ink);
  transition: transform 0.15s ease, box-shadow 0.15s ease;
}

.category-card:hover {
  transform: translateY(-4px);
  box-shadow: 0 8px 24px rgba(23, 35, 59, 0.12);
}

.category-card p {
  color: var(--muted);
}

.category-emoji {
  font-size: 2rem;
  margin-bottom: 0.75rem;
}

.card-blue { background: #dbeafe; border-color: #93c5fd; }
.card-green { background: #dcfce7; border-color: #86efac; }
.card-emerald { background: #d1fae5; border-color: #6ee7b7; }
.card-red { background: #fee2e2; border-color: #fca5a5; }
.card-purple { background: #f3e8ff; border-color: #d8b4fe; }
.card-orange { background: #ffedd5; border-color: #fdba74; }
.card-gray { background: #f3f4f6; border-color: #d1d5db; }

/* Misc */

.not-found {
  text-align: center;
  padding: 4rem 0;
}

.not-found h1 {
  font-size: 4rem;
  color: var(--muted);
}

.empty-state {
  text-align: center;
  color: var(--muted);
  padding: 2rem 0;
}
"#;

const DEFAULT_JS: &str = r#"// Viewer page interactions.
(function () {
  'use strict';

  // Copy-share-link buttons
  document.querySelectorAll('[data-copy-link]').forEach(function (button) {
    button.addEventListener('click', function () {
      var url = button.getAttribute('data-copy-link');
      var label = button.textContent;
      navigator.clipboard.writeText(url).then(
        function () {
          button.textContent = 'Copied!';
          setTimeout(function () { button.textContent = label; }, 2000);
        },
        function () {
          window.prompt('Copy this link:', url);
        }
      );
    });
  });

  // Editor mock save - no persistence
  document.querySelectorAll('[data-demo-save]').forEach(function (button) {
    button.addEventListener('click', function () {
      button.disabled = true;
      button.textContent = 'Saving...';
      setTimeout(function () {
        button.disabled = false;
        button.textContent = 'Save';
        window.alert('Changes saved! (Demo only - no actual file write)');
      }, 1000);
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".category-card"));
        assert!(css.contains(".embed-frame"));
    }

    #[test]
    fn minifies_css() {
        let css = AssetPipeline::generate_css();
        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains("card-gray"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("data-copy-link"));
        assert!(js.contains("data-demo-save"));
    }
}
