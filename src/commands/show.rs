//! Show a single post

use anyhow::Result;

use super::list::format_record;
use crate::content::Projection;
use crate::Blog;

/// Print one post projected onto the requested fields
pub fn run(blog: &Blog, slug: &str, projection: &Projection, json: bool) -> Result<()> {
    println!("{}", show(blog, slug, projection, json)?);
    Ok(())
}

pub fn show(blog: &Blog, slug: &str, projection: &Projection, json: bool) -> Result<String> {
    let record = blog.index().load_post_by_slug(slug, projection)?;

    if json {
        Ok(serde_json::to_string_pretty(&record)?)
    } else {
        format_record(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentError;
    use std::fs;

    #[test]
    fn test_show_post() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("posts/tech/hello.mdx");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "---\ntitle: Hello\ndate: '2023-01-05'\n---\nBody\n").unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());

        let projection: Projection = "title,content".parse().unwrap();
        let out = show(&blog, "tech/hello", &projection, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "Hello", "content": "Body\n"})
        );
    }

    #[test]
    fn test_show_missing_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts/tech")).unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());

        let err = show(&blog, "tech/ghost", &Projection::all(), false).unwrap_err();
        assert!(err
            .downcast_ref::<ContentError>()
            .map(ContentError::is_not_found)
            .unwrap_or(false));
    }
}
