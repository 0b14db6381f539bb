//! Preview server
//!
//! Serves the public directory and, unless started in static mode, rebuilds
//! the site whenever a post or the configuration changes.

use anyhow::Result;
use axum::Router;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::Blog;

/// Build the router serving the generated site
pub fn router(public_dir: PathBuf) -> Router {
    let service = ServeDir::new(public_dir).append_index_html_on_directories(true);
    Router::new()
        .fallback_service(service)
        .layer(TraceLayer::new_for_http())
}

/// Resolve the address to bind; `localhost` maps to the IPv4 loopback
pub fn bind_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    Ok(format!("{}:{}", bind_ip, port).parse()?)
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let addr = bind_addr(ip, port)?;
    let app = router(blog.public_dir.clone());

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes...");
        let blog = blog.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_rebuild(&blog) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the posts and the config and regenerate on change
fn watch_and_rebuild(blog: &Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if blog.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", blog.posts_dir);
    }

    let config_path = blog.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| generate::is_relevant_change(blog, &e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match generate::reload(blog).and_then(|blog| generate::run(&blog)) {
                    Ok(()) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        assert_eq!(
            bind_addr("localhost", 4000).unwrap(),
            "127.0.0.1:4000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(bind_addr("0.0.0.0", 80).unwrap().port(), 80);
        assert!(bind_addr("not an ip", 80).is_err());
    }
}
