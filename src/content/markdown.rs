//! Markdown rendering
//!
//! A small, line-oriented subset of markdown rendered by a fixed sequence of
//! rewrite stages. Each stage works on the text the previous one produced, so
//! the order in [`Stage::PIPELINE`] is part of the output format.
//!
//! Only fenced code blocks are HTML-escaped. Inline code, link labels and the
//! rest of the text pass through as written.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::html_escape;

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```([A-Za-z0-9_]+)?\n(.*?)```").unwrap();
    static ref HEADING_3: Regex = Regex::new(r"(?mR)^### (.*)$").unwrap();
    static ref HEADING_2: Regex = Regex::new(r"(?mR)^## (.*)$").unwrap();
    static ref HEADING_1: Regex = Regex::new(r"(?mR)^# (.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref BLOCKQUOTE: Regex = Regex::new(r"(?mR)^> (.*)$").unwrap();
    static ref UNORDERED_ITEM: Regex = Regex::new(r"(?mR)^\* (.*)$").unwrap();
    static ref LIST_SPAN: Regex = Regex::new(r"(?s)(<li>.*</li>)").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"(?mR)^[0-9]+\. (.*)$").unwrap();
    static ref BLOCK_START: Regex = Regex::new(r"^<(h[1-3]|ul|ol|pre|blockquote)").unwrap();
}

/// One rewrite step of the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// ```` ```lang ```` fences become escaped `<pre><code>` blocks
    FencedCode,
    /// `### `, `## `, `# ` line prefixes, longest first
    Headings,
    /// `**text**`
    Bold,
    /// `*text*`; runs after [`Stage::Bold`] has consumed double asterisks
    Italic,
    /// `[label](url)`
    Links,
    /// `![alt](url)`
    ///
    /// Runs after [`Stage::Links`], which has already rewritten any image with
    /// a non-empty alt text into a link. Only `![](url)` reaches this stage.
    Images,
    /// `` `code` ``
    InlineCode,
    /// `> ` line prefix, one element per line
    Blockquotes,
    /// `* ` line prefix; the first `<li>` through the last `</li>` is wrapped
    /// in a single `<ul>`
    UnorderedList,
    /// `1. ` line prefix; items are not wrapped in a list container
    OrderedList,
    /// Blank-line separated chunks become paragraphs unless they already start
    /// with a block element
    Paragraphs,
}

impl Stage {
    /// Every stage, in the order [`render`] applies them
    pub const PIPELINE: [Stage; 11] = [
        Stage::FencedCode,
        Stage::Headings,
        Stage::Bold,
        Stage::Italic,
        Stage::Links,
        Stage::Images,
        Stage::InlineCode,
        Stage::Blockquotes,
        Stage::UnorderedList,
        Stage::OrderedList,
        Stage::Paragraphs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::FencedCode => "fenced-code",
            Stage::Headings => "headings",
            Stage::Bold => "bold",
            Stage::Italic => "italic",
            Stage::Links => "links",
            Stage::Images => "images",
            Stage::InlineCode => "inline-code",
            Stage::Blockquotes => "blockquotes",
            Stage::UnorderedList => "unordered-list",
            Stage::OrderedList => "ordered-list",
            Stage::Paragraphs => "paragraphs",
        }
    }

    /// Rewrite `text`; text the stage does not recognize is left alone
    pub fn apply(self, text: &str) -> String {
        match self {
            Stage::FencedCode => FENCED_CODE
                .replace_all(text, |caps: &Captures| {
                    let lang = caps.get(1).map_or("plaintext", |m| m.as_str());
                    format!(
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        lang,
                        html_escape(caps[2].trim())
                    )
                })
                .into_owned(),
            Stage::Headings => {
                let h3 = HEADING_3.replace_all(text, "<h3>${1}</h3>");
                let h2 = HEADING_2.replace_all(&h3, "<h2>${1}</h2>");
                HEADING_1.replace_all(&h2, "<h1>${1}</h1>").into_owned()
            }
            Stage::Bold => BOLD
                .replace_all(text, "<strong>${1}</strong>")
                .into_owned(),
            Stage::Italic => ITALIC.replace_all(text, "<em>${1}</em>").into_owned(),
            Stage::Links => LINK
                .replace_all(
                    text,
                    r#"<a href="${2}" target="_blank" rel="noopener">${1}</a>"#,
                )
                .into_owned(),
            Stage::Images => IMAGE
                .replace_all(text, r#"<img src="${2}" alt="${1}" loading="lazy">"#)
                .into_owned(),
            Stage::InlineCode => INLINE_CODE
                .replace_all(text, "<code>${1}</code>")
                .into_owned(),
            Stage::Blockquotes => BLOCKQUOTE
                .replace_all(text, "<blockquote>${1}</blockquote>")
                .into_owned(),
            Stage::UnorderedList => {
                let items = UNORDERED_ITEM.replace_all(text, "<li>${1}</li>");
                LIST_SPAN.replacen(&items, 1, "<ul>${1}</ul>").into_owned()
            }
            Stage::OrderedList => ORDERED_ITEM
                .replace_all(text, "<li>${1}</li>")
                .into_owned(),
            Stage::Paragraphs => text
                .split("\n\n")
                .map(|chunk| {
                    if BLOCK_START.is_match(chunk) {
                        chunk.to_string()
                    } else {
                        format!("<p>{}</p>", chunk)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Render a markdown body into an HTML fragment
pub fn render(markdown: &str) -> String {
    Stage::PIPELINE
        .iter()
        .fold(markdown.to_string(), |text, stage| stage.apply(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Title\n\nSome **bold** and *italic* text.");
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <strong>bold</strong> and <em>italic</em> text.</p>"
        );
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(render("Just some words."), "<p>Just some words.</p>");
    }

    #[test]
    fn test_heading_levels() {
        let html = render("### Three\n## Two\n# One");
        assert_eq!(html, "<h3>Three</h3>\n<h2>Two</h2>\n<h1>One</h1>");
    }

    #[test]
    fn test_heading_needs_space() {
        assert_eq!(render("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn test_code_block_is_escaped() {
        let html = render("```\n<script>alert(1)</script>\n```");
        assert_eq!(
            html,
            r#"<pre><code class="language-plaintext">&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"#
        );
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_code_block_language() {
        let html = render("Intro\n\n```rust\n  let x = \"a\" & 'b';  \n```");
        assert!(html.starts_with("<p>Intro</p>\n"));
        assert!(html.contains(
            r#"<pre><code class="language-rust">let x = &quot;a&quot; &amp; &#039;b&#039;;</code></pre>"#
        ));
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            Stage::Italic.apply(&Stage::Bold.apply("**a** *b*")),
            "<strong>a</strong> <em>b</em>"
        );
    }

    #[test]
    fn test_links() {
        let html = render("See [docs](https://example.com).");
        assert_eq!(
            html,
            r#"<p>See <a href="https://example.com" target="_blank" rel="noopener">docs</a>.</p>"#
        );
    }

    #[test]
    fn test_images_after_links() {
        // Empty alt text is the only form the link stage leaves for images
        assert_eq!(
            render("![](pic.png)"),
            r#"<p><img src="pic.png" alt="" loading="lazy"></p>"#
        );
        assert_eq!(
            render("![cat](cat.png)"),
            r#"<p>!<a href="cat.png" target="_blank" rel="noopener">cat</a></p>"#
        );
    }

    #[test]
    fn test_inline_code_is_not_escaped() {
        assert_eq!(render("Use `<b>` here"), "<p>Use <code><b></code> here</p>");
    }

    #[test]
    fn test_crlf_line_endings_stay_outside_elements() {
        assert_eq!(render("# Title\r\nText"), "<h1>Title</h1>\r\nText");
        assert_eq!(
            Stage::Blockquotes.apply("> quoted\r\n> again"),
            "<blockquote>quoted</blockquote>\r\n<blockquote>again</blockquote>"
        );
        assert_eq!(
            Stage::UnorderedList.apply("* a\r\n* b"),
            "<ul><li>a</li>\r\n<li>b</li></ul>"
        );
    }

    #[test]
    fn test_blockquote_lines_are_separate() {
        assert_eq!(
            render("> one\n> two"),
            "<blockquote>one</blockquote>\n<blockquote>two</blockquote>"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            render("* one\n* two"),
            "<ul><li>one</li>\n<li>two</li></ul>"
        );
    }

    #[test]
    fn test_unordered_list_wrapped_once() {
        let html = Stage::UnorderedList.apply("* a\n\ntext\n\n* b");
        assert_eq!(html, "<ul><li>a</li>\n\ntext\n\n<li>b</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
    }

    #[test]
    fn test_ordered_list_is_not_wrapped() {
        assert_eq!(
            render("1. first\n2. second"),
            "<p><li>first</li>\n<li>second</li></p>"
        );
    }

    #[test]
    fn test_paragraph_split() {
        assert_eq!(
            render("one\n\ntwo\nstill two"),
            "<p>one</p>\n<p>two\nstill two</p>"
        );
    }

    #[test]
    fn test_stage_without_match_is_identity() {
        for stage in Stage::PIPELINE {
            if stage == Stage::Paragraphs {
                continue;
            }
            assert_eq!(stage.apply("plain text"), "plain text", "{}", stage.name());
        }
    }

    proptest! {
        #[test]
        fn prop_plain_text_is_one_paragraph(s in "[a-zA-Z0-9 ,]{1,60}") {
            prop_assert_eq!(render(&s), format!("<p>{}</p>", s));
        }

        #[test]
        fn prop_fenced_code_is_escaped(code in "[<>&\"' a-z]{0,40}") {
            let html = render(&format!("```\n{}\n```", code));
            let inner = html
                .strip_prefix(r#"<pre><code class="language-plaintext">"#)
                .and_then(|rest| rest.strip_suffix("</code></pre>"));
            prop_assert!(inner.is_some());
            let inner = inner.unwrap_or_default();
            prop_assert!(!inner.contains(['<', '>', '"', '\'']));
            prop_assert_eq!(inner.matches('&').count(), inner.matches(';').count());
        }
    }
}
