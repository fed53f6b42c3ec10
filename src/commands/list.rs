//! List site content

use anyhow::Result;
use serde::Serialize;

use crate::content::{ContentRecord, Projection};
use crate::Blog;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Posts,
    Categories,
}

impl std::str::FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" | "posts" => Ok(ListKind::Posts),
            "category" | "categories" => Ok(ListKind::Categories),
            _ => anyhow::bail!("Unknown type: {}. Available: post, category", s),
        }
    }
}

#[derive(Debug, Serialize)]
struct CategorySummary {
    name: String,
    title: String,
    description: String,
    posts: usize,
}

/// List site content by type
pub fn run(
    blog: &Blog,
    kind: ListKind,
    category: Option<&str>,
    projection: &Projection,
    json: bool,
) -> Result<()> {
    let output = match kind {
        ListKind::Posts => list_posts(blog, category, projection, json)?,
        ListKind::Categories => list_categories(blog, json)?,
    };
    println!("{}", output);
    Ok(())
}

/// Post listing: every post by date string, or one category by calendar date
pub fn list_posts(
    blog: &Blog,
    category: Option<&str>,
    projection: &Projection,
    json: bool,
) -> Result<String> {
    let index = blog.index();
    let posts = match category {
        Some(category) => index.category_posts(category, projection)?,
        None => index.all_posts(projection)?,
    };

    if json {
        return Ok(serde_json::to_string_pretty(&posts)?);
    }

    let mut out = format!("Posts ({}):", posts.len());
    for post in &posts {
        out.push_str("\n  ");
        out.push_str(&format_record(post)?);
    }
    Ok(out)
}

/// Category listing with descriptor titles and post counts
pub fn list_categories(blog: &Blog, json: bool) -> Result<String> {
    let index = blog.index();
    let post_ids = index.post_ids()?;

    let categories = index
        .categories()?
        .into_iter()
        .map(|name| -> Result<CategorySummary> {
            let meta = index.category_meta(&name)?;
            let posts = post_ids.iter().filter(|id| id.category == name).count();
            Ok(CategorySummary {
                name,
                title: meta.title,
                description: meta.description,
                posts,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        return Ok(serde_json::to_string_pretty(&categories)?);
    }

    let mut out = format!("Categories ({}):", categories.len());
    for c in &categories {
        out.push_str(&format!("\n  {} - {} ({})", c.name, c.title, c.posts));
    }
    Ok(out)
}

/// One line per record, fields in projection order
pub(crate) fn format_record(record: &ContentRecord) -> Result<String> {
    let values = record
        .fields()
        .filter_map(|field| record.get(field).map(|value| (field, value)))
        .map(|(field, value)| -> Result<String> {
            let text = match value.as_str() {
                Some(s) => s.lines().next().unwrap_or("").to_string(),
                None => serde_json::to_string(value)?,
            };
            Ok(format!("{}: {}", field, text))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(values.join(" | "))
}
