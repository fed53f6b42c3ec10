//! Generator module - renders the content index to static HTML files
//!
//! Every page is rendered in memory before anything is written, so a failing
//! post or a missing descriptor leaves the public directory untouched.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentIndex, Field, MarkdownRenderer, Post, Projection};
use crate::helpers::{html_escape, machine_date, post_list, time_tag, PageMeta};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// A rendered page waiting to be written
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Path relative to the public directory
    pub path: PathBuf,
    pub html: String,
}

/// Counts reported after a generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub posts: usize,
    pub categories: usize,
    pub pages: usize,
}

/// Static site generator
pub struct Generator<'a> {
    blog: &'a Blog,
    index: ContentIndex,
    markdown: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(blog: &'a Blog) -> Self {
        let markdown = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
        );
        Self {
            blog,
            index: blog.index(),
            markdown,
        }
    }

    /// Fields shown in post listings
    fn listing_projection() -> Projection {
        Projection::new([Field::Date, Field::Description, Field::Slug, Field::Title])
    }

    /// Render and write the entire site
    pub fn generate(&self) -> Result<GenerateSummary> {
        let (pages, summary) = self.render_site()?;

        fs::create_dir_all(&self.blog.public_dir)?;
        for page in &pages {
            let output_path = self.blog.public_dir.join(&page.path);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {:?}", parent))?;
            }
            fs::write(&output_path, &page.html)
                .with_context(|| format!("Failed to write {:?}", output_path))?;
            tracing::debug!("Generated: {:?}", output_path);
        }

        Ok(summary)
    }

    /// Render every page without touching the public directory
    pub fn render_site(&self) -> Result<(Vec<RenderedPage>, GenerateSummary)> {
        let site = self.build_site_data()?;
        let renderer = TemplateRenderer::new(&self.blog.config, &site);

        let mut pages = vec![self.render_index(&renderer)?];

        for (category, _) in &site.categories {
            pages.push(self.render_category(&renderer, category)?);
        }

        let post_ids = self.index.post_ids()?;
        for id in &post_ids {
            let post = self.index.post(id)?;
            pages.push(self.render_post(&renderer, &post)?);
        }

        pages.push(self.render_about(&renderer));

        let summary = GenerateSummary {
            posts: post_ids.len(),
            categories: site.categories.len(),
            pages: pages.len(),
        };
        Ok((pages, summary))
    }

    /// Every category with posts must have a descriptor
    fn build_site_data(&self) -> Result<SiteData> {
        let categories = self
            .index
            .categories()?
            .into_iter()
            .map(|category| -> Result<_> {
                let meta = self
                    .index
                    .category_meta(&category)
                    .with_context(|| format!("Category {:?} has no usable descriptor", category))?;
                Ok((category, meta))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SiteData { categories })
    }

    /// Home page listing every post
    fn render_index(&self, renderer: &TemplateRenderer) -> Result<RenderedPage> {
        let config = &self.blog.config;
        let posts = self.index.all_posts(&Self::listing_projection())?;

        let meta = PageMeta {
            title: config.title.clone(),
            path: "/".to_string(),
            ..Default::default()
        };
        let hero = format!("<h1>{}</h1>", html_escape(&config.title));
        let html = renderer.render(&meta, Some(&hero), &post_list(config, &posts));

        Ok(RenderedPage {
            path: PathBuf::from("index.html"),
            html,
        })
    }

    /// Category index page
    fn render_category(
        &self,
        renderer: &TemplateRenderer,
        category: &str,
    ) -> Result<RenderedPage> {
        let config = &self.blog.config;
        let listing = self
            .index
            .category_page(category, &Self::listing_projection())?;

        let meta = PageMeta {
            title: format!("{} - {}", listing.meta.title, config.author),
            description: Some(listing.meta.description.clone()),
            path: format!("/{}/", category),
            ..Default::default()
        };
        let content = format!(
            r#"<h1 class="category-title">{}</h1>
<p class="category-description">{}</p>
{}"#,
            html_escape(&listing.meta.title),
            html_escape(&listing.meta.description),
            post_list(config, &listing.posts)
        );

        Ok(RenderedPage {
            path: PathBuf::from(category).join("index.html"),
            html: renderer.render(&meta, None, &content),
        })
    }

    /// Single post page
    fn render_post(&self, renderer: &TemplateRenderer, post: &Post) -> Result<RenderedPage> {
        let config = &self.blog.config;
        let body = self
            .markdown
            .render(&post.body)
            .with_context(|| format!("Failed to render {} ({:?})", post.id, post.source))?;

        let meta = PageMeta {
            title: format!("{} - {}", post.title(), config.author),
            description: post.description().map(str::to_string),
            image: post.image().map(str::to_string),
            date: post.date().map(machine_date),
            kind: Some("article".to_string()),
            path: format!("/{}", post.id.path()),
        };

        let date = post
            .date()
            .map(|d| format!(r#"<p class="post-date">{}</p>"#, time_tag(d, &config.date_format)))
            .unwrap_or_default();
        let content = format!(
            r#"<article>
<h1 class="post-title">{}</h1>
{}
<div class="prose">{}</div>
</article>"#,
            html_escape(post.title()),
            date,
            body
        );

        Ok(RenderedPage {
            path: PathBuf::from(&post.id.category)
                .join(&post.id.slug)
                .join("index.html"),
            html: renderer.render(&meta, None, &content),
        })
    }

    /// Static about page
    fn render_about(&self, renderer: &TemplateRenderer) -> RenderedPage {
        let config = &self.blog.config;
        let meta = PageMeta {
            title: format!("About - {}", config.author),
            path: "/about/".to_string(),
            ..Default::default()
        };
        let content = format!(
            "<h1>About Page</h1>\n<p>{}</p>",
            html_escape(&config.about)
        );

        RenderedPage {
            path: PathBuf::from("about").join("index.html"),
            html: renderer.render(&meta, None, &content),
        }
    }
}
