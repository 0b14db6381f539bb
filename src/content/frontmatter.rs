//! Front-matter extraction
//!
//! A document may open with a metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: "My Post"
//! labels: rust, web
//! image: cover.png
//! ---
//! Body text
//! ```
//!
//! Extraction never fails. Anything that cannot be read as metadata falls back
//! to defaults and the text is handed on as body.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Line that opens and closes the metadata block
const DELIMITER: &str = "---";

/// Title used when a document does not declare one
pub const DEFAULT_TITLE: &str = "Untitled Post";

/// Author used when neither the document nor the site configuration names one
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// Values a [`Metadata`] record starts from before the block is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDefaults {
    pub title: String,
    pub author: String,
    pub date: String,
}

impl MetadataDefaults {
    /// Defaults with a specific author identity and today's UTC date
    pub fn with_author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Self::default()
        }
    }
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Metadata read from a document's front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    /// Kept as written; see [`Metadata::parse_date`]
    pub date: String,
    pub labels: Vec<String>,

    /// Any other `key: value` pair, in declaration order
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Metadata {
    /// Build a record holding only the given defaults
    pub fn from_defaults(defaults: &MetadataDefaults) -> Self {
        Self {
            title: defaults.title.clone(),
            author: defaults.author.clone(),
            date: defaults.date.clone(),
            labels: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    /// Split a raw document into metadata and body using the stock defaults
    pub fn extract(raw: &str) -> (Self, String) {
        Self::extract_with(raw, &MetadataDefaults::default())
    }

    /// Split a raw document into metadata and body
    ///
    /// Returns `(metadata, body)`. The body is trimmed. When the document has
    /// no block, or the block is never closed, the metadata is all defaults
    /// and the body is the whole trimmed document.
    pub fn extract_with(raw: &str, defaults: &MetadataDefaults) -> (Self, String) {
        let content = raw.trim().trim_start_matches('\u{feff}').trim_start();
        let lines: Vec<&str> = content.split('\n').collect();

        if lines.first().map(|line| line.trim()) != Some(DELIMITER) {
            tracing::trace!("No front-matter found, using defaults");
            return (Self::from_defaults(defaults), content.to_string());
        }

        let Some(end) = lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == DELIMITER)
            .map(|i| i + 1)
        else {
            tracing::debug!("Front-matter block is never closed, treating it as body");
            return (Self::from_defaults(defaults), content.to_string());
        };

        let mut metadata = Self::from_defaults(defaults);
        for line in &lines[1..end] {
            metadata.apply_line(line);
        }

        let body = lines[end + 1..].join("\n").trim().to_string();
        (metadata, body)
    }

    /// Apply a single `key: value` line; unreadable lines are ignored
    fn apply_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        if key.is_empty() {
            return;
        }

        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return;
        }

        match key {
            "labels" => self.labels = split_labels(value),
            "title" => self.title = strip_quotes(value).to_string(),
            "author" => self.author = strip_quotes(value).to_string(),
            "date" => self.date = strip_quotes(value).to_string(),
            _ => {
                self.extra
                    .insert(key.to_string(), strip_quotes(value).to_string());
            }
        }
    }

    /// Look up any field by name, well-known or extension
    ///
    /// `labels` is not a scalar and is never returned here.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => Some(&self.title),
            "author" => Some(&self.author),
            "date" => Some(&self.date),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// Featured image, if the document declares one
    pub fn image(&self) -> Option<&str> {
        self.get("image")
    }

    /// Parse the date string; `None` when it is not a recognizable date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        parse_date_string(&self.date)
    }

    /// Write the record back out as a front-matter block
    ///
    /// Quotes stripped during extraction are not restored, so extracting the
    /// output again yields the same record but not the same text.
    pub fn to_frontmatter(&self) -> String {
        let mut out = String::from(DELIMITER);
        out.push('\n');
        out.push_str(&format!("title: {}\n", self.title));
        out.push_str(&format!("author: {}\n", self.author));
        out.push_str(&format!("date: {}\n", self.date));
        if !self.labels.is_empty() {
            out.push_str(&format!("labels: {}\n", self.labels.join(", ")));
        }
        for (key, value) in &self.extra {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

/// Split a comma-separated label list, dropping empty entries
fn split_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove one pair of matching surrounding quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Parse a date string in the formats posts commonly use
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
