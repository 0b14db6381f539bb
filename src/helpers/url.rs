//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in a label directory name
///
/// Everything but ASCII alphanumerics, `-` and `_` is encoded, so distinct
/// labels always get distinct, non-empty directory names with no `/` or `.`.
const LABEL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Percent-encode each segment of a path, keeping the separators
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Output path of a post page, relative to the public directory
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}/", config.post_dir.trim_matches('/'), slug)
}

/// Output path of a label page, relative to the public directory
pub fn label_path(config: &SiteConfig, label: &str) -> String {
    format!(
        "{}/{}/",
        config.label_dir.trim_matches('/'),
        utf8_percent_encode(label, LABEL_SEGMENT)
    )
}

/// Output path of the n-th page of a listing rooted at `base`
pub fn page_path(config: &SiteConfig, base: &str, page: usize) -> String {
    let base = base.trim_matches('/');
    let prefix = if base.is_empty() {
        String::new()
    } else {
        format!("{}/", base)
    };

    if page <= 1 {
        prefix
    } else {
        format!("{}{}/{}/", prefix, config.pagination_dir.trim_matches('/'), page)
    }
}

/// Site URL of a post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &encode_path(&post_path(config, slug)))
}

/// Site URL of a label page
pub fn label_url(config: &SiteConfig, label: &str) -> String {
    url_for(config, &encode_path(&label_path(config, label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_post_url_encodes_segments() {
        let config = test_config();
        assert_eq!(post_url(&config, "my post"), "/blog/post/my%20post/");
        assert_eq!(post_path(&config, "my post"), "post/my post/");
    }

    #[test]
    fn test_label_path_keeps_labels_apart() {
        let config = test_config();
        assert_eq!(label_path(&config, "rust"), "labels/rust/");
        assert_eq!(label_path(&config, "C"), "labels/C/");
        assert_eq!(label_path(&config, "C++"), "labels/C%2B%2B/");
        assert_eq!(label_path(&config, "!!!"), "labels/%21%21%21/");
        assert_eq!(label_path(&config, "a/../b"), "labels/a%2F%2E%2E%2Fb/");
    }

    #[test]
    fn test_label_url_encodes_directory_name() {
        let config = test_config();
        assert_eq!(label_url(&config, "web-dev"), "/blog/labels/web-dev/");
        assert_eq!(label_url(&config, "Web Dev"), "/blog/labels/Web%2520Dev/");
    }

    #[test]
    fn test_page_path() {
        let config = test_config();
        assert_eq!(page_path(&config, "", 1), "");
        assert_eq!(page_path(&config, "", 3), "page/3/");
        assert_eq!(page_path(&config, "labels/rust/", 2), "labels/rust/page/2/");
    }
}
