//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: A blog laid out as post cards
author: Your Name
introduction: I write about things I learn.
language: en
site_url: http://localhost:4000
root: /
icon: ''
keywords: [blog]

# Social handles, empty ones are hidden
social:
  twitter: ''
  github: ''
  medium: ''
  facebook: ''
  linkedin: ''
  instagram: ''

# Comments: utterances (owner/repo) wins over disqus
comment:
  disqus_short_name: ''
  utterances: ''

configs:
  count_of_initial_post: 10

sponsor:
  buy_me_a_coffee_id: ''

share:
  facebook_app_id: ''

ga: ''
ad: ''

# Generator
content_dir: content/blog
public_dir: public
default_category: uncategorized
date_format: MMMM DD, YYYY
timezone: ''
page_size: 4
"#;

const HELLO_WORLD: &str = r#"---
title: Hello World
date: 2024-01-01 00:00:00
category: general
tags: [welcome]
---

Welcome to your new blog. This paragraph shows up on the post card.

<!-- more -->

Write posts as Markdown files under `content/blog`, then run `bee-rs generate`.

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("content/blog/hello-world"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(
        target_dir.join("content/blog/hello-world/index.md"),
        HELLO_WORLD,
    )?;
    fs::write(target_dir.join(".gitignore"), "public/\n")?;

    tracing::info!("Created site skeleton in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "My Blog");
        assert_eq!(blog.config.page_size, 4);
        assert_eq!(blog.config.configs.count_of_initial_post, 10);
        assert!(blog.content_dir.join("hello-world/index.md").exists());

        // Refuses to overwrite an existing site
        assert!(init_site(dir.path()).is_err());
    }

    #[test]
    fn test_init_site_generates() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        blog.generate().unwrap();

        assert!(blog.public_dir.join("index.html").exists());
        assert!(blog.public_dir.join("hello-world/index.html").exists());
        assert!(blog.public_dir.join("categories/general/index.html").exists());
    }
}
