//! Content module - posts, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, MORE_MARKER};
pub use post::{Post, PostSummary};
