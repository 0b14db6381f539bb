//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::ContentLoader;
use crate::generator::{self, Generator};
use crate::Blog;

/// Load every post and write the site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let posts = ContentLoader::new(blog).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(blog).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Whether a changed path should trigger a rebuild
pub fn is_relevant_change(blog: &Blog, path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !generator::is_output_path(blog, path)
        && !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
}

/// Watch the posts and the config for changes and regenerate
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if blog.posts_dir.exists() {
        watcher.watch(&blog.posts_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = blog.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", blog.posts_dir);

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                if !event.paths.iter().any(|p| is_relevant_change(blog, p)) {
                    continue;
                }
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(blog).and_then(|blog| run(&blog)) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the configuration so config edits apply to the next build
pub fn reload(blog: &Blog) -> Result<Blog> {
    Blog::new(&blog.base_dir)
}
