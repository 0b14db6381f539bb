//! Generator module - writes the static site into the public directory

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::helpers::{
    collect_labels, filter_posts, label_path, page_path, post_path, post_url, related_posts,
    Pagination,
};
use crate::templates;
use crate::Blog;

/// Static site generator
pub struct Generator {
    blog: Blog,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Generate the entire site from posts sorted newest first
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        self.write("css/style.css", templates::STYLESHEET)?;

        let labels = collect_labels(posts);
        let all: Vec<&Post> = posts.iter().collect();

        // Home listing
        self.generate_listing(None, "", &all, &labels)?;

        // One listing per label
        for label in labels.keys() {
            let tagged = filter_posts(posts, "", Some(label.as_str()));
            let base = label_path(&self.blog.config, label);
            self.generate_listing(Some(label.as_str()), &base, &tagged, &labels)?;
        }

        self.generate_post_pages(posts)?;
        self.generate_search_index(posts)?;

        tracing::info!(
            "Generated {} posts and {} labels into {:?}",
            posts.len(),
            labels.len(),
            self.blog.public_dir
        );
        Ok(())
    }

    /// Generate every page of one listing
    fn generate_listing(
        &self,
        heading: Option<&str>,
        base: &str,
        posts: &[&Post],
        labels: &IndexMap<String, usize>,
    ) -> Result<()> {
        let config = &self.blog.config;
        let mut pages = Pagination::new(posts.len(), config.page_size());

        // An empty listing still gets its first page
        let total_pages = pages.total_pages().max(1);
        for page_num in 1..=total_pages {
            pages.go_to(page_num);
            let html =
                templates::listing_page(config, heading, base, pages.slice(posts), &pages, labels);
            let path = page_path(config, base, page_num);
            self.write(&format!("{}index.html", path), &html)?;
        }

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.blog.config;

        for post in posts {
            let related = related_posts(post, posts, config.related_posts);
            let html = templates::post_page(config, post, &related);
            let path = post_path(config, &post.slug);
            self.write(&format!("{}index.html", path), &html)?;
        }

        Ok(())
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "title": p.title(),
                    "excerpt": p.excerpt,
                    "labels": p.labels(),
                    "date": p.metadata.date,
                    "url": post_url(&self.blog.config, &p.slug),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        self.write("search.json", &json)
    }

    /// Write a file below the public directory, creating parent directories
    fn write(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative.trim_start_matches('/'));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Whether `path` lies inside the generated output
pub fn is_output_path(blog: &Blog, path: &Path) -> bool {
    path.starts_with(&blog.public_dir)
}
