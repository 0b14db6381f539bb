//! Built-in page templates
//!
//! Pages are assembled from small string-building functions. Text taken from
//! post metadata is escaped here; rendered post bodies are inserted as-is.

use indexmap::IndexMap;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{
    encode_path, html_escape, image_tag, label_url, link_to, page_path, post_url, time_tag,
    url_for, Pagination, RelatedPost,
};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; color: #222; background: #fafafa; }
header, main, footer { max-width: 52rem; margin: 0 auto; padding: 1rem; }
header a { color: inherit; text-decoration: none; }
.post-card { background: #fff; border-radius: 8px; margin-bottom: 1.5rem; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.post-card .post-content { padding: 1rem 1.25rem; }
.post-image img { width: 100%; max-height: 16rem; object-fit: cover; }
.post-meta { color: #666; font-size: .9rem; display: flex; gap: 1rem; }
.label { display: inline-block; background: #eef; border-radius: 4px; padding: .1rem .5rem; margin: 0 .25rem .25rem 0; font-size: .85rem; }
.label-filter a { margin-right: .5rem; }
.pagination { display: flex; gap: 1rem; align-items: center; justify-content: center; }
.post-body pre { background: #272822; color: #f8f8f2; padding: 1rem; overflow-x: auto; }
.post-body blockquote { border-left: 4px solid #ccd; margin: 0; padding-left: 1rem; color: #555; }
.related-posts { display: grid; grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr)); gap: 1rem; }
.related-post-card { background: #fff; padding: .75rem; border-radius: 6px; }
.no-posts, .no-related { color: #888; text-align: center; padding: 2rem; }
.search input { width: 100%; padding: .5rem; box-sizing: border-box; }
"#;

/// Client-side search over `search.json`, matching titles and excerpts
const SEARCH_SCRIPT: &str = r#"<script>
(function () {
  var input = document.getElementById('search-input');
  var results = document.getElementById('search-results');
  var index = null;
  function show(term) {
    results.innerHTML = '';
    index.filter(function (p) {
      return p.title.toLowerCase().includes(term) || p.excerpt.toLowerCase().includes(term);
    }).forEach(function (p) {
      var item = document.createElement('li');
      var link = document.createElement('a');
      link.href = p.url;
      link.textContent = p.title;
      item.appendChild(link);
      results.appendChild(item);
    });
    if (!results.children.length) {
      results.innerHTML = '<li>No posts match your search.</li>';
    }
    results.hidden = false;
  }
  input.addEventListener('input', function () {
    var term = input.value.trim().toLowerCase();
    if (!term) {
      results.hidden = true;
      return;
    }
    if (index) {
      show(term);
      return;
    }
    fetch(input.dataset.index)
      .then(function (r) { return r.json(); })
      .then(function (data) { index = data; show(input.value.trim().toLowerCase()); });
  });
})();
</script>"#;

/// Wrap page content in the site layout
pub fn layout(config: &SiteConfig, title: &str, content: &str) -> String {
    let page_title = if title.is_empty() {
        html_escape(&config.title)
    } else {
        format!("{} - {}", html_escape(title), html_escape(&config.title))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<meta name="generator" content="mdblog {version}">
<title>{page_title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body>
<header><h1><a href="{home}">{site_title}</a></h1></header>
<main>
{content}
</main>
<footer>&copy; {author}</footer>
</body>
</html>
"#,
        description = html_escape(&config.description),
        version = env!("CARGO_PKG_VERSION"),
        page_title = page_title,
        css = url_for(config, "css/style.css"),
        home = url_for(config, "/"),
        site_title = html_escape(&config.title),
        content = content,
        author = html_escape(&config.author),
    )
}

/// Label links for a post
fn label_list(config: &SiteConfig, labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| {
            format!(
                r#"<a class="label" href="{}">{}</a>"#,
                label_url(config, label),
                html_escape(label)
            )
        })
        .collect()
}

/// Card shown for each post on a listing page
pub fn post_card(config: &SiteConfig, post: &Post) -> String {
    let href = post_url(config, &post.slug);
    let image = post
        .image()
        .map(|src| image_tag(src, post.title()))
        .unwrap_or_default();

    format!(
        r#"<article class="post-card">
<div class="post-image">{image}</div>
<div class="post-content">
<div class="post-meta"><span class="post-author">{author}</span><span class="post-date">{date}</span></div>
<h3>{title}</h3>
<p class="post-excerpt">{excerpt}</p>
<div class="post-labels">{labels}</div>
{read_more}
</div>
</article>"#,
        image = image,
        author = html_escape(post.author()),
        date = time_tag(post.date(), &post.metadata.date, false),
        title = link_to(&href, post.title()),
        excerpt = html_escape(&post.excerpt),
        labels = label_list(config, post.labels()),
        read_more = format!(r#"<a class="read-more" href="{}">Read More &rarr;</a>"#, href),
    )
}

/// Search box backed by `search.json`
fn search_box(config: &SiteConfig) -> String {
    format!(
        r#"<form class="search" role="search" onsubmit="return false"><input type="search" id="search-input" placeholder="Search posts..." data-index="{}"></form>
<ul id="search-results" hidden></ul>
{}
"#,
        url_for(config, "search.json"),
        SEARCH_SCRIPT
    )
}

/// Previous/next navigation for a listing rooted at `base`
///
/// Empty when everything fits on one page.
pub fn pagination_nav(config: &SiteConfig, base: &str, pages: &Pagination) -> String {
    let total = pages.total_pages();
    if total <= 1 {
        return String::new();
    }

    let page_url = |page| url_for(config, &encode_path(&page_path(config, base, page)));

    let prev = if pages.has_prev() {
        link_to(&page_url(pages.current - 1), "Previous")
    } else {
        r#"<span class="disabled">Previous</span>"#.to_string()
    };
    let next = if pages.has_next() {
        link_to(&page_url(pages.current + 1), "Next")
    } else {
        r#"<span class="disabled">Next</span>"#.to_string()
    };

    format!(
        r#"<nav class="pagination">{}<span class="page-number">Page {} of {}</span>{}</nav>"#,
        prev, pages.current, total, next
    )
}

/// A page of a post listing
///
/// `heading` names the filter (e.g. a label) when the listing is not the home
/// page. `labels` feeds the label filter bar.
pub fn listing_page(
    config: &SiteConfig,
    heading: Option<&str>,
    base: &str,
    posts: &[&Post],
    pages: &Pagination,
    labels: &IndexMap<String, usize>,
) -> String {
    let mut content = search_box(config);

    if !labels.is_empty() {
        content.push_str(r#"<nav class="label-filter">"#);
        content.push_str(&link_to(&url_for(config, "/"), "All"));
        for (label, count) in labels {
            content.push_str(&format!(
                r#"<a href="{}">{} ({})</a>"#,
                label_url(config, label),
                html_escape(label),
                count
            ));
        }
        content.push_str("</nav>\n");
    }

    if let Some(heading) = heading {
        content.push_str(&format!("<h2>{}</h2>\n", html_escape(heading)));
    }

    if posts.is_empty() {
        content.push_str(r#"<div class="no-posts">No posts found.</div>"#);
    } else {
        content.push_str(r#"<div class="blog-posts">"#);
        for post in posts {
            content.push('\n');
            content.push_str(&post_card(config, post));
        }
        content.push_str("\n</div>\n");
        content.push_str(&pagination_nav(config, base, pages));
    }

    layout(config, heading.unwrap_or_default(), &content)
}

/// Cards for the related posts section
fn related_section(config: &SiteConfig, related: &[RelatedPost<'_>]) -> String {
    if related.is_empty() {
        return r#"<div class="no-related">No related posts found.</div>"#.to_string();
    }

    let cards: String = related
        .iter()
        .map(|r| {
            format!(
                r#"<div class="related-post-card"><h4>{}</h4><div class="related-date">{}</div></div>"#,
                link_to(&post_url(config, &r.post.slug), r.post.title()),
                time_tag(r.post.date(), &r.post.metadata.date, true)
            )
        })
        .collect();

    format!(r#"<div class="related-posts">{}</div>"#, cards)
}

/// A single post with its related posts
pub fn post_page(config: &SiteConfig, post: &Post, related: &[RelatedPost<'_>]) -> String {
    let image = post
        .image()
        .map(|src| format!(r#"<div class="post-image">{}</div>"#, image_tag(src, post.title())))
        .unwrap_or_default();

    let labels = if post.labels().is_empty() {
        String::new()
    } else {
        format!(
            r#"<section class="post-labels-section"><h3>Labels</h3>{}</section>"#,
            label_list(config, post.labels())
        )
    };

    let content = format!(
        r#"<article class="post">
<h2 class="post-title">{title}</h2>
<div class="post-meta"><span class="post-author">{author}</span><span class="post-date">{date}</span></div>
{image}
<div class="post-body">
{body}
</div>
{labels}
</article>
<section class="related"><h3>Related Posts</h3>{related}</section>"#,
        title = html_escape(post.title()),
        author = html_escape(post.author()),
        date = time_tag(post.date(), &post.metadata.date, false),
        image = image,
        body = post.content,
        labels = labels,
        related = related_section(config, related),
    );

    layout(config, post.title(), &content)
}
