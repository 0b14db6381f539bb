//! Date helper functions
//!
//! Post dates are stored as written in the front-matter. These helpers format
//! them for display and fall back to the raw string when it is not a date.

use chrono::NaiveDate;

/// Format a date in long form (like "January 5, 2024")
pub fn long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in short form (like "Jan 5, 2024")
pub fn short_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a parsed date, or show the raw value as written
pub fn display_date(parsed: Option<NaiveDate>, raw: &str, short: bool) -> String {
    match parsed {
        Some(date) if short => short_date(&date),
        Some(date) => long_date(&date),
        None => raw.to_string(),
    }
}

/// Generate a <time> HTML element
pub fn time_tag(parsed: Option<NaiveDate>, raw: &str, short: bool) -> String {
    let display = super::html_escape(&display_date(parsed, raw, short));
    match parsed {
        Some(date) => format!(
            r#"<time datetime="{}">{}</time>"#,
            date.format("%Y-%m-%d"),
            display
        ),
        None => format!("<time>{}</time>", display),
    }
}
