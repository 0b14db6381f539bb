//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::{read_index, INDEX_FILE};
use crate::content::Metadata;
use crate::Blog;

/// Write a new post with a front-matter block and register it in the index
pub fn create_post(blog: &Blog, title: &str, labels: &[String]) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_name = format!("{}.md", slug);
    let file_path = blog.posts_dir.join(&file_name);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut metadata = Metadata::from_defaults(&blog.config.metadata_defaults());
    metadata.title = title.to_string();
    metadata.labels = labels
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let content = format!("{}\n", metadata.to_frontmatter());
    fs::write(&file_path, content)?;

    let index_path = blog.posts_dir.join(INDEX_FILE);
    if index_path.exists() {
        let mut entries = read_index(&index_path)?;
        entries.insert(0, file_name);
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&index_path, json + "\n")
            .with_context(|| format!("Failed to update {:?}", index_path))?;
    }

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "My New Post", &["rust".into(), " ".into()]).unwrap();
        assert!(path.ends_with("my-new-post.md"));

        let post = ContentLoader::new(&blog).load_post("my-new-post").unwrap();
        assert_eq!(post.title(), "My New Post");
        assert_eq!(post.labels(), ["rust"]);
        assert_eq!(post.author(), "anonymous");
        assert!(post.date().is_some());

        assert!(create_post(&blog, "My New Post", &[]).is_err());
    }

    #[test]
    fn test_create_post_updates_index() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        fs::create_dir_all(&blog.posts_dir).unwrap();
        fs::write(blog.posts_dir.join(INDEX_FILE), r#"["old.md"]"#).unwrap();

        create_post(&blog, "Fresh", &[]).unwrap();

        let entries = read_index(&blog.posts_dir.join(INDEX_FILE)).unwrap();
        assert_eq!(entries, vec!["fresh.md", "old.md"]);
    }

    #[test]
    fn test_create_post_rejects_empty_slug() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(create_post(&blog, "!!!", &[]).is_err());
    }
}
