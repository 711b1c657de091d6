//! Create a new post

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `<content_dir>/<slug>/index.md` with front-matter filled in
pub fn create_post(blog: &Blog, title: &str, category: Option<&str>) -> Result<PathBuf> {
    let now = Local::now();

    let slug = match slug::slugify(title) {
        s if s.is_empty() => format!("post-{}", now.format("%Y%m%d%H%M%S")),
        s => s,
    };

    let post_dir = blog.content_dir.join(&slug);
    let file_path = post_dir.join("index.md");

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let category = category.unwrap_or(&blog.config.default_category);
    let content = format!(
        "---\ntitle: {}\ndate: {}\ncategory: {}\ndraft: false\n---\n\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S"),
        yaml_string(category),
    );

    fs::create_dir_all(&post_dir)?;
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Quote a scalar for YAML
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
