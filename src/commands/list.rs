//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::group_by_category;
use crate::Blog;

/// List posts or categories
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(blog);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_all()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.category,
                    if post.draft { " (draft)" } else { "" }
                );
            }
        }
        "category" | "categories" => {
            let posts = loader.load_posts()?;
            let groups = group_by_category(&posts);
            println!("Categories ({}):", groups.len());
            for (name, indices) in &groups {
                println!("  {} ({})", name, indices.len());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
