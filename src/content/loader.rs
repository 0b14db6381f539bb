//! Content loader - loads posts from the posts directory

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{MetadataDefaults, Post};
use crate::Blog;

/// Name of the file listing which posts to publish
pub const INDEX_FILE: &str = "index.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Invalid posts index {path:?}: {source}")]
    InvalidIndex {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    defaults: MetadataDefaults,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            defaults: blog.config.metadata_defaults(),
        }
    }

    /// File names of the posts to publish, relative to the posts directory
    ///
    /// Read from `index.json` when present, otherwise every markdown file in
    /// the posts directory in name order.
    pub fn post_files(&self) -> Result<Vec<String>, LoadError> {
        let posts_dir = &self.blog.posts_dir;
        let index_path = posts_dir.join(INDEX_FILE);

        if index_path.exists() {
            return read_index(&index_path);
        }

        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let files = WalkDir::new(posts_dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                e.path()
                    .strip_prefix(posts_dir)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();

        Ok(files)
    }

    /// Load every published post, newest first
    ///
    /// A post that cannot be read is logged and skipped.
    pub fn load_posts(&self) -> Result<Vec<Post>, LoadError> {
        let files = self.post_files()?;
        let mut posts = Vec::with_capacity(files.len());

        for file in &files {
            match self.read_post(file) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {}: {}", file, e);
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| a.cmp_newest_first(b));

        Ok(posts)
    }

    /// Load a single post by slug
    pub fn load_post(&self, slug: &str) -> Result<Post, LoadError> {
        self.read_post(&format!("{}.md", slug))
    }

    fn read_post(&self, file: &str) -> Result<Post, LoadError> {
        let path = self.blog.posts_dir.join(file);
        if !path.is_file() {
            return Err(LoadError::PostNotFound(file.to_string()));
        }

        let raw = fs::read_to_string(&path)?;
        let post = Post::parse(file, &raw, &self.defaults, self.blog.config.excerpt_length);
        tracing::debug!("Loaded post {:?} ({})", post.title(), file);
        Ok(post)
    }
}

/// Read the list of post file names from `index.json`
pub fn read_index(path: &Path) -> Result<Vec<String>, LoadError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidIndex {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn blog_with_posts(files: &[(&str, &str)]) -> (TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in files {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_load_from_index() {
        let (_dir, blog) = blog_with_posts(&[
            ("index.json", r#"["a.md", "missing.md", "b.md"]"#),
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nFirst"),
            ("b.md", "---\ntitle: B\ndate: 2024-02-01\n---\nSecond"),
            ("unlisted.md", "---\ntitle: Hidden\n---\n"),
        ]);

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_fallback_to_directory_scan() {
        let (_dir, blog) = blog_with_posts(&[
            ("one.md", "One"),
            ("two.markdown", "Two"),
            ("notes.txt", "ignored"),
        ]);

        let loader = ContentLoader::new(&blog);
        assert_eq!(loader.post_files().unwrap(), vec!["one.md", "two.markdown"]);
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_index() {
        let (_dir, blog) = blog_with_posts(&[("index.json", "{not json")]);
        let err = ContentLoader::new(&blog).load_posts().unwrap_err();
        assert!(matches!(err, LoadError::InvalidIndex { .. }));
    }

    #[test]
    fn test_load_post_by_slug() {
        let (_dir, blog) = blog_with_posts(&[("hello.md", "Hello")]);
        let loader = ContentLoader::new(&blog);

        let post = loader.load_post("hello").unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title(), "Untitled Post");
        assert_eq!(post.body, "Hello");

        let err = loader.load_post("nope").unwrap_err();
        assert!(matches!(err, LoadError::PostNotFound(_)));
    }

    #[test]
    fn test_author_default_from_config() {
        let (dir, _) = blog_with_posts(&[("a.md", "No metadata")]);
        fs::write(dir.path().join("_config.yml"), "author: site-owner\n").unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let post = ContentLoader::new(&blog).load_post("a").unwrap();
        assert_eq!(post.author(), "site-owner");
    }
}
