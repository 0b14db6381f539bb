//! List site content

use anyhow::Result;

use crate::content::{ContentLoader, Post};
use crate::helpers::{collect_labels, display_date, filter_posts, Pagination};
use crate::Blog;

/// Filters applied to the post listing
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub search: String,
    pub label: Option<String>,
    /// 1-based page number
    pub page: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            label: None,
            page: 1,
        }
    }
}

/// One page of the filtered listing, as printed by `list post`
pub fn post_listing(posts: &[Post], options: &ListOptions, per_page: usize) -> Result<Vec<String>> {
    let filtered = filter_posts(posts, &options.search, options.label.as_deref());
    let mut pages = Pagination::new(filtered.len(), per_page);

    if filtered.is_empty() {
        return Ok(vec!["No posts match your search criteria.".to_string()]);
    }

    if !pages.go_to(options.page) {
        anyhow::bail!(
            "Page {} is out of range (1-{})",
            options.page,
            pages.total_pages()
        );
    }

    let mut lines = vec![format!(
        "Posts ({}), page {} of {}:",
        filtered.len(),
        pages.current,
        pages.total_pages()
    )];
    for post in pages.slice(&filtered) {
        let mut line = format!(
            "  {} - {} [{}]",
            display_date(post.date(), &post.metadata.date, false),
            post.title(),
            post.slug
        );
        if !post.labels().is_empty() {
            line.push_str(&format!(" ({})", post.labels().join(", ")));
        }
        lines.push(line);
    }

    Ok(lines)
}

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, options: &ListOptions) -> Result<()> {
    let posts = ContentLoader::new(blog).load_posts()?;

    match content_type {
        "post" | "posts" => {
            for line in post_listing(&posts, options, blog.config.page_size())? {
                println!("{}", line);
            }
        }
        "label" | "labels" => {
            let labels = collect_labels(&posts);
            println!("Labels ({}):", labels.len());
            for (label, count) in labels {
                println!("  {} ({})", label, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, label", content_type);
        }
    }

    Ok(())
}
