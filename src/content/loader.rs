//! Content index - loads posts and category descriptors from the posts directory

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::error::{ContentError, Result};
use super::frontmatter::{parse_date, value_as_text};
use super::post::CONTENT_EXTENSIONS;
use super::scanner::{category_dir, ScanEntry, Scanner};
use super::{CategoryMeta, ContentRecord, Field, FrontMatter, Post, PostId, Projection};

/// Default name of the per-category descriptor file
pub const DEFAULT_DESCRIPTOR: &str = "meta.json";

/// A category's descriptor together with its posts
#[derive(Debug, Clone)]
pub struct CategoryListing {
    pub category: String,
    pub meta: CategoryMeta,
    pub posts: Vec<ContentRecord>,
}

/// Read-only view over a posts directory. Every call goes back to the
/// filesystem; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    root: PathBuf,
    descriptor: String,
}

impl ContentIndex {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_descriptor(root, DEFAULT_DESCRIPTOR)
    }

    pub fn with_descriptor<P: Into<PathBuf>>(root: P, descriptor: &str) -> Self {
        Self {
            root: root.into(),
            descriptor: descriptor.to_string(),
        }
    }

    fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.root, &self.descriptor)
    }

    /// Every file one level below a category directory
    pub fn scan(&self) -> Result<Vec<ScanEntry>> {
        self.scanner().scan()
    }

    /// Every post identifier, ordered by category then file name
    pub fn post_ids(&self) -> Result<Vec<PostId>> {
        self.scanner().post_ids()
    }

    /// Distinct categories that hold at least one post, in scan order
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for id in self.post_ids()? {
            if categories.last() != Some(&id.category) {
                categories.push(id.category);
            }
        }
        Ok(categories)
    }

    /// Resolve the source file of a post, preferring `.mdx` over `.md`
    pub fn resolve(&self, id: &PostId) -> Result<PathBuf> {
        let dir = category_dir(&self.root, &id.category);
        CONTENT_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", id.slug, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| ContentError::NotFound(format!("post {}", id)))
    }

    /// Load a post with its full front matter and body
    pub fn post(&self, id: &PostId) -> Result<Post> {
        let source = self.resolve(id)?;
        let raw = fs::read_to_string(&source).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentError::NotFound(format!("post {}", id)),
            _ => ContentError::fs(&source, e),
        })?;

        let (front_matter, body) =
            FrontMatter::parse(&raw).map_err(|e| ContentError::parse(&source, e))?;
        let body = body.to_string();

        tracing::debug!("Loaded {} ({} front-matter keys)", id, front_matter.len());

        Ok(Post {
            id: id.clone(),
            source,
            front_matter,
            body,
        })
    }

    /// Load a post projected onto the requested fields
    pub fn load_post(&self, id: &PostId, projection: &Projection) -> Result<ContentRecord> {
        let post = self.post(id)?;
        Ok(projection.apply(&post.id, &post.front_matter, &post.body))
    }

    /// Load a post by its `category/slug` identifier
    pub fn load_post_by_slug(
        &self,
        slug: &str,
        projection: &Projection,
    ) -> Result<ContentRecord> {
        let id = PostId::parse(slug).ok_or_else(|| ContentError::NotFound(slug.to_string()))?;
        self.load_post(&id, projection)
    }

    /// Read a category's descriptor file
    pub fn category_meta(&self, category: &str) -> Result<CategoryMeta> {
        let path = category_dir(&self.root, category).join(&self.descriptor);
        CategoryMeta::load(&path)
    }

    /// Every post, newest first.
    ///
    /// Dates are compared as plain strings here, whereas
    /// [`category_posts`](Self::category_posts) compares calendar dates. The
    /// two orders disagree on dates without zero padding (`2023-9-1` sorts
    /// after `2023-10-01`). Posts without a date sort last.
    pub fn all_posts(&self, projection: &Projection) -> Result<Vec<ContentRecord>> {
        let mut posts = self
            .post_ids()?
            .iter()
            .map(|id| -> Result<(String, ContentRecord)> {
                let post = self.post(id)?;
                let date = post
                    .front_matter
                    .get(Field::Date.name())
                    .and_then(value_as_text)
                    .unwrap_or_default();
                Ok((date, projection.apply(&post.id, &post.front_matter, &post.body)))
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable: equal dates keep scan order
        posts.sort_by(|(a, _), (b, _)| b.cmp(a));

        tracing::debug!("Listed {} posts", posts.len());
        Ok(posts.into_iter().map(|(_, record)| record).collect())
    }

    /// Posts whose `category/slug` starts with `category` (ignoring case),
    /// newest calendar date first. Undated posts sort last.
    pub fn category_posts(
        &self,
        category: &str,
        projection: &Projection,
    ) -> Result<Vec<ContentRecord>> {
        let prefix = category.to_lowercase();

        let mut posts = self
            .post_ids()?
            .iter()
            .filter(|id| id.to_string().to_lowercase().starts_with(&prefix))
            .map(|id| -> Result<(_, ContentRecord)> {
                let post = self.post(id)?;
                let date = post.date().and_then(parse_date);
                Ok((date, projection.apply(&post.id, &post.front_matter, &post.body)))
            })
            .collect::<Result<Vec<_>>>()?;

        posts.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        tracing::debug!("Listed {} posts in category {}", posts.len(), category);
        Ok(posts.into_iter().map(|(_, record)| record).collect())
    }

    /// A category's descriptor and its posts. The descriptor is required.
    pub fn category_page(
        &self,
        category: &str,
        projection: &Projection,
    ) -> Result<CategoryListing> {
        let meta = self.category_meta(category)?;
        let posts = self.category_posts(category, projection)?;
        Ok(CategoryListing {
            category: category.to_string(),
            meta,
            posts,
        })
    }
}
