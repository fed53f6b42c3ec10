//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    /// Per-category descriptor file name
    pub descriptor: String,

    // Writing
    /// date-fns style display format
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Layout
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    pub about: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Hasan Kharouf".to_string(),
            description: String::new(),
            author: "Hasan Kharouf".to_string(),
            language: "en".to_string(),

            url: "https://nextjs-typescript-mdx-blog.vercel.app".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            descriptor: "meta.json".to_string(),

            date_format: "MMMM dd, yyyy".to_string(),
            highlight: HighlightConfig::default(),

            links: Vec::new(),
            about: "Welcome to the about page".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        for key in config.unknown_keys() {
            tracing::warn!("Unknown config key {:?} in {:?}", key, path.as_ref());
        }
        Ok(config)
    }

    /// Top-level keys that no setting reads, sorted
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// A footer link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.descriptor, "meta.json");
        assert_eq!(config.date_format, "MMMM dd, yyyy");
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
posts_dir: content
highlight:
  line_number: true
links:
  - name: Github
    url: https://github.com/example
analytics: UA-1234
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.posts_dir, "content");
        assert_eq!(config.public_dir, "public");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.links[0].name, "Github");
        assert_eq!(config.unknown_keys(), vec!["analytics"]);
    }
}
