//! HTML and text helper functions

/// Escape HTML special characters
///
/// `& < > " '` become `&amp; &lt; &gt; &quot; &#039;`. Each character is
/// replaced once, so already-produced entities are never escaped again.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove the markdown punctuation that would be noise in a plain-text preview
pub fn strip_markdown(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '[' | ']' | '(' | ')'))
        .collect()
}

/// Build a plain-text excerpt of a markdown body
///
/// Takes the first `length` characters and appends `...` when text was cut.
pub fn excerpt(markdown: &str, length: usize) -> String {
    let plain = strip_markdown(markdown);
    let plain = plain.trim();

    if plain.chars().count() > length {
        let truncated: String = plain.chars().take(length).collect();
        format!("{}...", truncated)
    } else {
        plain.to_string()
    }
}

/// Generate an anchor tag
pub fn link_to(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, href, html_escape(text))
}

/// Generate an image tag
pub fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        html_escape(src),
        html_escape(alt)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_escape_no_double_escape() {
        assert_eq!(html_escape("&lt;"), "&amp;lt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_strip_markdown() {
        assert_eq!(
            strip_markdown("# Title with **bold** and [link](url) `code`"),
            " Title with bold and linkurl code"
        );
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("## Short", 150), "Short");
        assert_eq!(excerpt("abcdefghij", 4), "abcd...");
        assert_eq!(excerpt("abcd", 4), "abcd");
    }

    #[test]
    fn test_excerpt_counts_chars() {
        assert_eq!(excerpt("日本語のテキスト", 3), "日本語...");
    }

    #[test]
    fn test_image_tag() {
        assert_eq!(
            image_tag("a.png", "A \"quoted\" alt"),
            r#"<img src="a.png" alt="A &quot;quoted&quot; alt" loading="lazy">"#
        );
    }
}
