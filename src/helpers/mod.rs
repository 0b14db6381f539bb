//! Helper functions for page generation
//!
//! Dates, HTML escaping, URLs and the listing logic shared by the generator
//! and the `list` command.

mod date;
mod html;
mod list;
mod url;

pub use date::*;
pub use html::*;
pub use list::*;
pub use url::*;
