//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::loader::INDEX_FILE;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# mdblog configuration

# Site
title: My Blog
description: ''
# Author credited on posts without an `author:` line
author: anonymous

# URL
url: http://example.com
root: /

# Directory
posts_dir: posts
public_dir: public
post_dir: post
label_dir: labels

# Listing
per_page: 10
pagination_dir: page
excerpt_length: 150
related_posts: 3
"#;

const SAMPLE_POST: &str = r#"# Welcome

This is your very first post. Edit `posts/hello-world.md` or create a new one:

```bash
$ mdblog new "My New Post" --labels notes
```

## Writing posts

Each post starts with a front-matter block holding its **title**, *author*,
date and a comma-separated list of labels. Posts sharing labels are suggested
to readers as related posts.

> Run `mdblog server` to preview the site.
"#;

/// Initialize a new blog in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let defaults = SiteConfig::default();
    let posts_dir = target_dir.join(&defaults.posts_dir);
    fs::create_dir_all(&posts_dir)?;

    write_if_missing(&target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    write_if_missing(&posts_dir.join(INDEX_FILE), "[\n  \"hello-world.md\"\n]\n")?;

    let today = chrono::Utc::now().format("%Y-%m-%d");
    let sample = format!(
        "---\ntitle: Hello World\ndate: {}\nlabels: welcome\n---\n\n{}",
        today, SAMPLE_POST
    );
    write_if_missing(&posts_dir.join("hello-world.md"), &sample)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Skipping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
