//! Post models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Category shown on the card and used for category pages
    pub category: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Drafts are loaded but never published
    pub draft: bool,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Rendered excerpt (before <!-- more -->)
    pub excerpt: Option<String>,

    /// Front-matter description, preferred over the excerpt on cards
    pub description: Option<String>,

    /// Cover image
    pub thumbnail: Option<String>,

    /// URL-friendly name, also the post identifier
    pub slug: String,

    /// Source file path (relative to the content dir)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path, with leading and trailing slash
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            title,
            date,
            category: String::new(),
            tags: Vec::new(),
            draft: false,
            raw: String::new(),
            content: String::new(),
            excerpt: None,
            description: None,
            thumbnail: None,
            path: format!("/{}/", slug),
            slug,
            full_source: PathBuf::from(&source),
            source,
            permalink: String::new(),
            extra: HashMap::new(),
        }
    }

    /// Card-sized view of this post.
    ///
    /// The card fragment is the description if one was written, otherwise
    /// the hand-written excerpt, otherwise a plain-text summary of the body.
    pub fn summary(&self, date_format: &str, timezone: &str) -> PostSummary {
        let html = match (&self.description, &self.excerpt) {
            (Some(description), _) => crate::helpers::html_escape(description),
            (None, Some(excerpt)) => excerpt.clone(),
            (None, None) => crate::helpers::html_escape(&super::MarkdownRenderer::summarize(
                &self.content,
            )),
        };

        PostSummary {
            id: self.slug.clone(),
            html,
            title: self.title.clone(),
            category: self.category.clone(),
            date: crate::helpers::format_date_in(&self.date, date_format, timezone),
            path: self.path.clone(),
        }
    }

    /// The post published just before this one in a newest-first list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        posts.get(pos + 1)
    }

    /// The post published just after this one in a newest-first list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        pos.checked_sub(1).and_then(|i| posts.get(i))
    }
}

/// Read-only record a post card is rendered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    /// Stable identifier, used as the card key
    pub id: String,
    /// Trusted HTML fragment shown as the card description
    pub html: String,
    pub title: String,
    pub category: String,
    /// Display date
    pub date: String,
    /// URL of the post page
    pub path: String,
}

impl PostSummary {
    /// A summary with only an identifier set
    pub fn with_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: format!("/{}/", id),
            id,
            html: String::new(),
            title: String::new(),
            category: String::new(),
            date: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(title: &str, source: &str) -> Post {
        let date = Local.with_ymd_and_hms(2021, 3, 4, 9, 0, 0).unwrap();
        Post::new(title.to_string(), date, source.to_string())
    }

    #[test]
    fn test_new_post_slug_and_path() {
        let p = post("Hello World", "hello.md");
        assert_eq!(p.slug, "hello-world");
        assert_eq!(p.path, "/hello-world/");
    }

    #[test]
    fn test_summary_prefers_description() {
        let mut p = post("Hello", "hello.md");
        p.category = "dev".to_string();
        p.content = "<p>Body text</p>".to_string();
        p.excerpt = Some("<p>Excerpt</p>".to_string());
        p.description = Some("Fish & chips".to_string());

        let summary = p.summary("YYYY-MM-DD", "");
        assert_eq!(summary.id, "hello");
        assert_eq!(summary.html, "Fish &amp; chips");
        assert_eq!(summary.category, "dev");
        assert_eq!(summary.date, "2021-03-04");
        assert_eq!(summary.path, "/hello/");
    }

    #[test]
    fn test_summary_falls_back_to_excerpt_then_body() {
        let mut p = post("Hello", "hello.md");
        p.content = "<p>Body text</p>".to_string();
        assert_eq!(p.summary("YYYY", "").html, "Body text");

        p.excerpt = Some("<p>Excerpt</p>".to_string());
        assert_eq!(p.summary("YYYY", "").html, "<p>Excerpt</p>");
    }

    #[test]
    fn test_prev_next() {
        let posts = vec![post("C", "c.md"), post("B", "b.md"), post("A", "a.md")];
        assert_eq!(posts[1].prev(&posts).map(|p| p.title.as_str()), Some("A"));
        assert_eq!(posts[1].next(&posts).map(|p| p.title.as_str()), Some("C"));
        assert!(posts[0].next(&posts).is_none());
        assert!(posts[2].prev(&posts).is_none());
    }
}
