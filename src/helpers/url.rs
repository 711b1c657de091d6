//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Prefix a site path with the configured root
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/2/") // -> "/blog/posts/2/" with root "/blog/"
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

/// Absolute URL for a path that already carries the root
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.site_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode one path segment (spaces, non-ASCII names such as
/// Korean categories)
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Directory name for a category: the name itself, minus slashes.
/// Servers decode the encoded URL back to this name.
///
/// Names made only of dots (or empty) would resolve to the parent or the
/// current directory, so they map to dashes instead.
pub fn category_segment(name: &str) -> String {
    let segment = name.trim().replace(['/', '\\'], "-");
    if segment.chars().all(|c| c == '.') {
        return "-".repeat(segment.len() + 1);
    }
    segment
}
