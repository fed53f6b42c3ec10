//! List helper functions for post listings and category navigation

use super::date::time_tag;
use super::html::{html_escape, link_to};
use super::url::url_for;
use crate::config::SiteConfig;
use crate::content::{CategoryMeta, ContentRecord};

/// Render a listing of post records as `<article>` blocks.
///
/// Records are expected to carry `slug`, `title`, `date` and `description`;
/// missing fields are left out of the markup.
pub fn post_list(config: &SiteConfig, posts: &[ContentRecord]) -> String {
    let mut html = String::new();

    for post in posts {
        let Some(slug) = post.slug() else {
            continue;
        };
        let path = format!("/{}/", slug);
        let title = post.title().unwrap_or(slug);

        html.push_str(r#"<article class="post-item">"#);
        if let Some(date) = post.date() {
            html.push_str(&format!(
                r#"<p class="post-date">{}</p>"#,
                time_tag(date, &config.date_format)
            ));
        }
        html.push_str(&format!(
            r#"<h2 class="post-title">{}</h2>"#,
            link_to(config, &path, title)
        ));
        if let Some(description) = post.description() {
            html.push_str(&format!(
                r#"<p class="post-description">{}</p>"#,
                html_escape(description)
            ));
        }
        html.push_str(&format!(
            r#"<p class="post-more"><a href="{}">Read More</a></p>"#,
            html_escape(&url_for(config, &path))
        ));
        html.push_str("</article>");
    }

    html
}

/// Generate the category navigation bar
pub fn list_categories(config: &SiteConfig, categories: &[(String, CategoryMeta)]) -> String {
    if categories.is_empty() {
        return String::new();
    }

    let mut html = r#"<ul class="category-list">"#.to_string();
    for (name, meta) in categories {
        html.push_str(&format!(
            r#"<li class="category-list-item">{}</li>"#,
            link_to(config, &format!("/{}/", name), &meta.title)
        ));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Field, FrontMatter, PostId, Projection};

    fn record(slug: &str, front: &str) -> ContentRecord {
        let (fm, body) = FrontMatter::parse(front).unwrap();
        let (category, name) = slug.split_once('/').unwrap();
        Projection::new([Field::Slug, Field::Title, Field::Date, Field::Description]).apply(
            &PostId::new(category, name),
            &fm,
            body,
        )
    }

    #[test]
    fn test_post_list() {
        let config = SiteConfig::default();
        let posts = vec![record(
            "tech/hello",
            "---\ntitle: Hello\ndate: '2023-02-10'\ndescription: First\n---\n",
        )];

        let html = post_list(&config, &posts);
        assert!(html.contains(r#"<a href="/tech/hello/">Hello</a>"#));
        assert!(html.contains("February 10, 2023"));
        assert!(html.contains(r#"<p class="post-description">First</p>"#));
    }

    #[test]
    fn test_post_list_without_title_uses_slug() {
        let config = SiteConfig::default();
        let posts = vec![record("life/untitled", "No front matter")];

        let html = post_list(&config, &posts);
        assert!(html.contains(">life/untitled</a>"));
        assert!(!html.contains("post-date"));
    }

    #[test]
    fn test_list_categories() {
        let config = SiteConfig::default();
        let categories = vec![(
            "tech".to_string(),
            CategoryMeta {
                title: "Technology".to_string(),
                description: String::new(),
            },
        )];
        assert_eq!(
            list_categories(&config, &categories),
            r#"<ul class="category-list"><li class="category-list-item"><a href="/tech/">Technology</a></li></ul>"#
        );
        assert_eq!(list_categories(&config, &[]), "");
    }
}
