//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::{MetadataDefaults, DEFAULT_AUTHOR};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Author credited on posts that do not name one
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub post_dir: String,
    pub label_dir: String,

    // Listing
    pub per_page: usize,
    pub pagination_dir: String,
    pub excerpt_length: usize,
    pub related_posts: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: DEFAULT_AUTHOR.to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            post_dir: "post".to_string(),
            label_dir: "labels".to_string(),

            per_page: 10,
            pagination_dir: "page".to_string(),
            excerpt_length: 150,
            related_posts: 3,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Front-matter defaults for posts of this site
    pub fn metadata_defaults(&self) -> MetadataDefaults {
        MetadataDefaults::with_author(&self.author)
    }

    /// Posts per listing page, never zero
    pub fn page_size(&self) -> usize {
        self.per_page.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.author, DEFAULT_AUTHOR);
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.excerpt_length, 150);
        assert_eq!(config.related_posts, 3);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
author: someone
per_page: 5
github: someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.author, "someone");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.public_dir, "public");
        assert_eq!(
            config.extra.get("github").and_then(|v| v.as_str()),
            Some("someone")
        );
    }

    #[test]
    fn test_metadata_defaults_use_author() {
        let config = SiteConfig {
            author: "owner".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.metadata_defaults().author, "owner");
    }

    #[test]
    fn test_page_size_never_zero() {
        let config = SiteConfig {
            per_page: 0,
            ..SiteConfig::default()
        };
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(dir.path().join("_config.yml")).is_err());
    }
}
