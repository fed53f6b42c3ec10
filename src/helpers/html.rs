//! HTML helper functions

use super::url::{full_url_for, is_external, url_for};
use crate::config::SiteConfig;

pub use crate::content::html_escape;

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to(&config, "/about/", "About") // -> <a href="/about/">About</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    let href = url_for(config, path);

    if is_external(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noreferrer">{}</a>"#,
            html_escape(&href),
            html_escape(text)
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, html_escape(&href), html_escape(text))
    }
}

/// Head metadata for one page
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    /// Site path or absolute URL of the preview image
    pub image: Option<String>,
    /// Machine-readable publication date
    pub date: Option<String>,
    /// `website` or `article`
    pub kind: Option<String>,
    /// Site path of the page itself
    pub path: String,
}

/// Generate title, description, canonical and Open Graph tags
pub fn meta_tags(config: &SiteConfig, meta: &PageMeta) -> String {
    let description = meta
        .description
        .as_deref()
        .unwrap_or(&config.description);
    let canonical = full_url_for(config, &meta.path);

    let mut tags = vec![
        format!("<title>{}</title>", html_escape(&meta.title)),
        format!(
            r#"<meta name="description" content="{}">"#,
            html_escape(description)
        ),
        format!(r#"<link rel="canonical" href="{}">"#, html_escape(&canonical)),
        format!(
            r#"<meta property="og:url" content="{}">"#,
            html_escape(&canonical)
        ),
        format!(
            r#"<meta property="og:type" content="{}">"#,
            meta.kind.as_deref().unwrap_or("website")
        ),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(&config.title)
        ),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(&meta.title)
        ),
        format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ),
    ];

    if let Some(image) = &meta.image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(&full_url_for(config, image))
        ));
    }
    if let Some(date) = &meta.date {
        tags.push(format!(
            r#"<meta property="article:published_time" content="{}">"#,
            html_escape(date)
        ));
    }

    tags.join("\n")
}
