//! List helper functions: label sets, filtering, pagination and related posts

use indexmap::IndexMap;

use crate::content::Post;

/// Every label used across `posts` with its post count, in first-seen order
pub fn collect_labels(posts: &[Post]) -> IndexMap<String, usize> {
    let mut labels = IndexMap::new();
    for post in posts {
        for label in post.labels() {
            *labels.entry(label.clone()).or_insert(0) += 1;
        }
    }
    labels
}

/// Posts matching a search term and an optional label
///
/// The term matches case-insensitively against the title or the excerpt. An
/// empty term matches everything.
pub fn filter_posts<'a>(posts: &'a [Post], search: &str, label: Option<&str>) -> Vec<&'a Post> {
    let term = search.to_lowercase();

    posts
        .iter()
        .filter(|post| {
            let matches_search = post.title().to_lowercase().contains(&term)
                || post.excerpt.to_lowercase().contains(&term);
            let matches_label = label.map_or(true, |l| post.has_label(l));
            matches_search && matches_label
        })
        .collect()
}

/// Page position within a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub per_page: usize,
    pub total_items: usize,
    pub current: usize,
}

impl Pagination {
    /// Start on the first page
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            total_items,
            current: 1,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Move to `page`; pages outside `1..=total_pages` are refused
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current = page;
        true
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// The items shown on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.current - 1) * self.per_page).min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }
}

/// A post suggested alongside another, with the number of shared labels
#[derive(Debug, Clone, Copy)]
pub struct RelatedPost<'a> {
    pub post: &'a Post,
    pub relevance: usize,
}

/// Posts sharing labels with `current`, most shared labels first
///
/// Ties keep listing order. A post without labels has no related posts.
pub fn related_posts<'a>(current: &Post, posts: &'a [Post], limit: usize) -> Vec<RelatedPost<'a>> {
    if current.labels().is_empty() {
        return Vec::new();
    }

    let mut related: Vec<RelatedPost<'a>> = posts
        .iter()
        .filter(|post| post.slug != current.slug)
        .map(|post| RelatedPost {
            post,
            relevance: post
                .labels()
                .iter()
                .filter(|label| current.has_label(label))
                .count(),
        })
        .filter(|r| r.relevance > 0)
        .collect();

    related.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    related.truncate(limit);
    related
}
