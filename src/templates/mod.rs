//! Built-in page templates
//!
//! Pages share one layout: head tags, a header with the category navigation,
//! an optional hero block, the main content and a footer with the configured
//! links.

use crate::config::SiteConfig;
use crate::content::CategoryMeta;
use crate::helpers::{html_escape, link_to, list_categories, meta_tags, PageMeta};

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #111827; }
.main-bg { background: #e0f2fe; min-height: 100vh; display: flex; flex-direction: column; }
.container { max-width: 64rem; margin: 0 auto; padding: 1rem 2rem; }
header .container { display: flex; justify-content: space-between; align-items: center; }
.category-list { display: flex; gap: 1rem; list-style: none; padding: 0; margin: 0; }
.hero { min-height: 200px; display: flex; flex-direction: column; justify-content: flex-end; }
main { flex: 1; background: #fff; padding-bottom: 5rem; }
.post-date { color: #6b7280; font-size: 0.875rem; }
.anchor { margin-right: 0.25rem; }
.code-title { font-family: monospace; font-size: 0.875rem; padding: 0.25rem 0.75rem; background: #1f2937; color: #e5e7eb; }
footer .container { display: flex; justify-content: space-between; font-size: 0.875rem; }
.footer-links ul { list-style: none; padding: 0; }
"#;

/// Shared navigation data for every page
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    /// Category directory name and its descriptor, in scan order
    pub categories: Vec<(String, CategoryMeta)>,
}

/// Renders pages into the shared layout
pub struct TemplateRenderer<'a> {
    config: &'a SiteConfig,
    site: &'a SiteData,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(config: &'a SiteConfig, site: &'a SiteData) -> Self {
        Self { config, site }
    }

    /// Wrap page content in the layout
    pub fn render(&self, meta: &PageMeta, hero: Option<&str>, content: &str) -> String {
        let hero = hero
            .map(|h| format!(r#"<div class="hero"><div class="container">{}</div></div>"#, h))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head}
<style>{style}</style>
</head>
<body>
<div class="main-bg">
<header><div class="container"><nav>{home}{nav}</nav></div></header>
{hero}
<main><div class="container">
{content}
</div></main>
<footer><div class="container"><div></div>{footer}</div></footer>
</div>
</body>
</html>
"#,
            lang = html_escape(&self.config.language),
            head = meta_tags(self.config, meta),
            style = STYLE,
            home = link_to(self.config, "/", &self.config.title),
            nav = list_categories(self.config, &self.site.categories),
            hero = hero,
            content = content,
            footer = self.footer(),
        )
    }

    fn footer(&self) -> String {
        if self.config.links.is_empty() {
            return String::new();
        }

        let items: String = self
            .config
            .links
            .iter()
            .map(|link| format!("<li>{}</li>", link_to(self.config, &link.url, &link.name)))
            .collect();
        format!(
            r#"<div class="footer-links"><b>Links</b><ul>{}</ul></div>"#,
            items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;

    #[test]
    fn test_render_layout() {
        let config = SiteConfig {
            links: vec![LinkConfig {
                name: "Github".to_string(),
                url: "https://github.com/example".to_string(),
            }],
            ..Default::default()
        };
        let site = SiteData {
            categories: vec![(
                "tech".to_string(),
                CategoryMeta {
                    title: "Tech".to_string(),
                    description: "Code".to_string(),
                },
            )],
        };
        let meta = PageMeta {
            title: "Home".to_string(),
            path: "/".to_string(),
            ..Default::default()
        };

        let html = TemplateRenderer::new(&config, &site).render(
            &meta,
            Some("<h1>Hi</h1>"),
            "<p>Body</p>",
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains(r#"<a href="/tech/">Tech</a>"#));
        assert!(html.contains(r#"<div class="hero">"#));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("https://github.com/example"));
    }

    #[test]
    fn test_render_without_hero_or_links() {
        let config = SiteConfig::default();
        let site = SiteData::default();
        let html = TemplateRenderer::new(&config, &site).render(&PageMeta::default(), None, "");
        assert!(!html.contains(r#"class="hero""#));
        assert!(!html.contains("footer-links"));
    }
}
