//! Content loader - loads posts from the content directory

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::Blog;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all published posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.load_all()?;
        posts.retain(|p| !p.draft);
        Ok(posts)
    }

    /// Load every post including drafts, newest first
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first; ties broken by source so output order is stable
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.source.cmp(&b.source)));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let source = path
            .strip_prefix(&self.blog.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let slug = post_slug(path, &self.blog.content_dir);
        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content_html = self.renderer.render(&full_md)?;
        let excerpt_html = excerpt_md
            .as_deref()
            .map(|e| self.renderer.render(e))
            .transpose()?;

        let category = fm
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.blog.config.default_category.clone());

        let path_url = crate::helpers::url_for(&self.blog.config, &format!("{}/", slug));

        let mut post = Post::new(title, date, source);
        post.category = category;
        post.tags = fm.tags;
        post.draft = fm.draft;
        post.raw = body.to_string();
        post.content = content_html;
        post.excerpt = excerpt_html;
        post.description = fm.description;
        post.thumbnail = fm.thumbnail;
        post.full_source = path.to_path_buf();
        post.permalink = crate::helpers::full_url_for(&self.blog.config, &path_url);
        post.path = path_url;
        post.slug = slug;
        post.extra = fm.extra;

        Ok(post)
    }
}

/// Slug for a post file.
///
/// `hello-world.md` and `hello-world/index.md` both map to `hello-world`;
/// nested directories are kept so two posts with the same file name in
/// different folders do not collide.
fn post_slug(path: &Path, content_dir: &Path) -> String {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");

    let mut parts: Vec<String> = without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    if parts.len() > 1 && parts.last().map(|s| s == "index").unwrap_or(false) {
        parts.pop();
    }

    parts.join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
