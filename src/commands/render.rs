//! Render a single document to stdout

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{render, Metadata, MetadataDefaults};

/// What to print for a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The HTML fragment of the body
    Html,
    /// The extracted metadata as JSON
    Metadata,
}

/// Extract and render one document
pub fn render_document(raw: &str, defaults: &MetadataDefaults, output: Output) -> Result<String> {
    let (metadata, body) = Metadata::extract_with(raw, defaults);
    match output {
        Output::Html => Ok(render(&body)),
        Output::Metadata => Ok(serde_json::to_string_pretty(&metadata)?),
    }
}

/// Read `path` and print the requested output
pub fn run(path: &Path, defaults: &MetadataDefaults, output: Output) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    println!("{}", render_document(&raw, defaults, output)?);
    Ok(())
}
