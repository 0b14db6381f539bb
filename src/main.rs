//! CLI entry point for mdblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdblog::commands::list::ListOptions;
use mdblog::commands::render::Output;

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(version)]
#[command(about = "A small static blog generator for markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Comma-separated labels
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List posts or labels
    List {
        /// Type of content to list (post, label)
        #[arg(default_value = "post")]
        r#type: String,

        /// Case-insensitive search over titles and excerpts
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only list posts carrying this label
        #[arg(short, long)]
        label: Option<String>,

        /// Page of the listing to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Render a single markdown file to stdout
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Print the extracted metadata as JSON instead of HTML
        #[arg(short, long)]
        metadata: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdblog=debug,info"
    } else {
        "mdblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            mdblog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, labels } => {
            let blog = mdblog::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blog.new_post(&title, &labels)?;
        }

        Commands::Generate { watch } => {
            let blog = mdblog::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                tokio::task::spawn_blocking(move || mdblog::commands::generate::watch(&blog))
                    .await??;
            }
        }

        Commands::Server { port, ip, r#static } => {
            let blog = mdblog::Blog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdblog::server::start(&blog, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let blog = mdblog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List {
            r#type,
            search,
            label,
            page,
        } => {
            let blog = mdblog::Blog::new(&base_dir)?;
            let options = ListOptions {
                search,
                label,
                page,
            };
            mdblog::commands::list::run(&blog, &r#type, &options)?;
        }

        Commands::Render { file, metadata } => {
            let blog = mdblog::Blog::new(&base_dir)?;
            let path = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            let output = if metadata {
                Output::Metadata
            } else {
                Output::Html
            };
            mdblog::commands::render::run(&path, &blog.config.metadata_defaults(), output)?;
        }

        Commands::Version => {
            println!("mdblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
