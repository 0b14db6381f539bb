//! Content module - front-matter extraction, markdown rendering and posts

mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use frontmatter::{Metadata, MetadataDefaults, DEFAULT_AUTHOR, DEFAULT_TITLE};
pub use loader::{ContentLoader, LoadError};
pub use markdown::{render, Stage};
pub use post::Post;
