//! Post model

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

use super::{markdown, Metadata, MetadataDefaults};
use crate::helpers::excerpt;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// File name without the `.md` extension
    pub slug: String,

    /// Front-matter metadata
    pub metadata: Metadata,

    /// Markdown body, front-matter removed
    pub body: String,

    /// Plain-text preview of the body
    pub excerpt: String,

    /// Rendered HTML body
    pub content: String,
}

impl Post {
    /// Build a post from the raw text of `file_name`
    pub fn parse(
        file_name: &str,
        raw: &str,
        defaults: &MetadataDefaults,
        excerpt_length: usize,
    ) -> Self {
        let (metadata, body) = Metadata::extract_with(raw, defaults);
        let excerpt = excerpt(&body, excerpt_length);
        let content = markdown::render(&body);

        Self {
            slug: slug_from_file_name(file_name),
            metadata,
            body,
            excerpt,
            content,
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn labels(&self) -> &[String] {
        &self.metadata.labels
    }

    pub fn image(&self) -> Option<&str> {
        self.metadata.image()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.metadata.parse_date()
    }

    /// Whether the post carries `label`
    pub fn has_label(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }

    /// Newest first; posts without a readable date go last
    pub fn cmp_newest_first(&self, other: &Post) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Strip the markdown extension from an index entry
fn slug_from_file_name(file_name: &str) -> String {
    file_name
        .strip_suffix(".md")
        .or_else(|| file_name.strip_suffix(".markdown"))
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> MetadataDefaults {
        MetadataDefaults {
            title: "Untitled Post".to_string(),
            author: "owner".to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    fn post(file: &str, date: &str) -> Post {
        let raw = format!("---\ntitle: {}\ndate: {}\n---\nBody", file, date);
        Post::parse(file, &raw, &defaults(), 150)
    }

    #[test]
    fn test_parse_post() {
        let raw = "---\ntitle: Hello\nlabels: rust, web\nimage: cover.png\n---\n# Heading\n\nSome *text*.";
        let post = Post::parse("hello.md", raw, &defaults(), 150);
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.author(), "owner");
        assert_eq!(post.labels(), ["rust", "web"]);
        assert_eq!(post.image(), Some("cover.png"));
        assert_eq!(post.excerpt, "Heading\n\nSome text.");
        assert!(post.content.contains("<h1>Heading</h1>"));
        assert!(post.has_label("web"));
        assert!(!post.has_label("Web"));
    }

    #[test]
    fn test_slug_from_file_name() {
        assert_eq!(slug_from_file_name("a.md"), "a");
        assert_eq!(slug_from_file_name("b.markdown"), "b");
        assert_eq!(slug_from_file_name("c.txt"), "c.txt");
    }

    #[test]
    fn test_newest_first() {
        let mut posts = vec![
            post("old.md", "2023-01-01"),
            post("broken.md", "not a date"),
            post("new.md", "2024-06-01"),
        ];
        posts.sort_by(|a, b| a.cmp_newest_first(b));
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "broken"]);
    }
}
