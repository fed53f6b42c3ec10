//! Post identity and the fully loaded post

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::FrontMatter;

/// Extensions recognised as post content, in lookup order
pub const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Identity of a post: the category directory and the file stem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PostId {
    pub category: String,
    pub slug: String,
}

impl PostId {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }

    /// Parse a `category/slug` identifier. A trailing content extension is
    /// dropped. Returns `None` unless there are exactly two non-empty segments.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim_matches('/');
        let id = CONTENT_EXTENSIONS
            .iter()
            .find_map(|ext| id.strip_suffix(&format!(".{}", ext)))
            .unwrap_or(id);

        let (category, slug) = id.split_once('/')?;
        if category.is_empty() || slug.is_empty() || slug.contains('/') {
            return None;
        }
        if [category, slug].iter().any(|s| *s == "." || *s == "..") {
            return None;
        }
        Some(Self::new(category, slug))
    }

    /// Site-relative URL path of the post page
    pub fn path(&self) -> String {
        format!("{}/{}/", self.category, self.slug)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.slug)
    }
}

/// A post with its complete front matter and raw body, as handed to the renderer
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    /// Full source file path
    pub source: PathBuf,
    pub front_matter: FrontMatter,
    /// Raw MDX body after the front matter
    pub body: String,
}

impl Post {
    pub fn title(&self) -> &str {
        self.front_matter.get_str("title").unwrap_or(&self.id.slug)
    }

    pub fn date(&self) -> Option<&str> {
        self.front_matter.get_str("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.front_matter.get_str("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.front_matter.get_str("image")
    }
}
