//! Generator module - writes the static site into the public directory

use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::components::{Bio, CategoryNav, Comments, PostCardsColumn};
use crate::content::{MarkdownRenderer, Post, PostSummary};
use crate::helpers::{
    category_segment, date_xml, encode_segment, format_date_in, full_url_for, meta_generator,
    open_graph, url_for,
};
use crate::templates::{
    NavPost, PaginationData, PostPageData, SiteData, TemplateRenderer, STYLESHEET,
};
use crate::Blog;

/// Directory holding listing pages after the first
const POSTS_DIR: &str = "posts";

/// Directory holding category listings
const CATEGORY_DIR: &str = "categories";

/// Files copied verbatim to the site root
const STATIC_DIR: &str = "static";

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    column: PostCardsColumn,
}

/// Number of listing pages for `len` posts.
///
/// One more than the number of full pages, so the "More" link of a full
/// last page still points at a page that exists (an empty column).
pub fn listing_page_count(len: usize, page_size: usize) -> usize {
    len / page_size.max(1) + 1
}

/// Site-relative path of listing page `page` under `base` (empty for the
/// home listing). Page 1 lives at the base itself.
pub fn listing_page_path(base: &str, page: usize) -> String {
    match (base.is_empty(), page) {
        (true, 1) => String::new(),
        (true, n) => format!("{}/{}/", POSTS_DIR, n),
        (false, 1) => base.to_string(),
        (false, n) => format!("{}{}/", base, n),
    }
}

/// Group posts by category, in first-seen order of the given list
pub fn group_by_category(posts: &[Post]) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, post) in posts.iter().enumerate() {
        groups.entry(post.category.clone()).or_default().push(i);
    }
    groups
}

/// Fail if two pages would be written to the same directory: a post slug
/// shadowing a listing page (`posts/2`, `categories/dev`), two posts with
/// one slug, or two categories that map to one directory.
pub fn check_output_paths(
    posts: &[Post],
    groups: &IndexMap<String, Vec<usize>>,
    page_size: usize,
) -> Result<()> {
    let mut taken: HashMap<String, String> = HashMap::new();
    let mut claim = |dir: String, owner: String| -> Result<()> {
        if let Some(previous) = taken.get(&dir) {
            anyhow::bail!("{} and {} are both written to /{}", previous, owner, dir);
        }
        taken.insert(dir, owner);
        Ok(())
    };

    claim("atom.xml/".to_string(), "the atom feed".to_string())?;
    for page in 1..=listing_page_count(posts.len(), page_size) {
        claim(
            listing_page_path("", page),
            format!("home listing page {}", page),
        )?;
    }
    for (name, indices) in groups {
        let base = category_dir(name);
        for page in 1..=listing_page_count(indices.len(), page_size) {
            claim(
                listing_page_path(&base, page),
                format!("category {:?} listing page {}", name, page),
            )?;
        }
    }
    for post in posts {
        claim(format!("{}/", post.slug), format!("post {:?}", post.source))?;
    }

    Ok(())
}

/// Rendered fragments shared by every listing page
struct ListingShell<'a> {
    site: &'a SiteData,
    bio: &'a str,
    categories: &'a [(String, String)],
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        if blog.config.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        let renderer = TemplateRenderer::new()?;
        let column = PostCardsColumn::new(blog.config.page_size);

        Ok(Self {
            blog: blog.clone(),
            renderer,
            column,
        })
    }

    /// Generate the entire site. `posts` must be sorted newest first.
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        let groups = group_by_category(posts);
        check_output_paths(posts, &groups, self.column.page_size())?;

        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_assets()?;
        self.write_stylesheet()?;

        let config = &self.blog.config;
        let summaries: Vec<PostSummary> = posts
            .iter()
            .map(|p| p.summary(&config.date_format, &config.timezone))
            .collect();

        let categories: Vec<(String, String)> = groups
            .keys()
            .map(|name| (name.clone(), url_for(config, &category_base(name))))
            .collect();

        let site_data = self.build_site_data();
        let bio = Bio.render(config).to_html();
        let shell = ListingShell {
            site: &site_data,
            bio: &bio,
            categories: &categories,
        };

        self.generate_listing(&shell, &summaries, None)?;

        for (name, indices) in &groups {
            let category_posts: Vec<PostSummary> =
                indices.iter().map(|&i| summaries[i].clone()).collect();
            self.generate_listing(&shell, &category_posts, Some(name.as_str()))?;
        }
        tracing::info!("Generated {} category listings", groups.len());

        self.generate_post_pages(posts, &site_data, &bio)?;
        self.generate_atom_feed(posts)?;

        Ok(())
    }

    /// Build site data for templates
    fn build_site_data(&self) -> SiteData {
        let config = &self.blog.config;

        let icon = icon_file_name(&config.icon)
            .map(|name| url_for(config, &name))
            .unwrap_or_default();

        SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            keywords: config.keywords.join(", "),
            home: url_for(config, ""),
            icon,
            stylesheet: url_for(config, "css/style.css"),
            feed: url_for(config, "atom.xml"),
            ga: if config.analytics_enabled() {
                config.ga.clone()
            } else {
                String::new()
            },
            ad: config.ad.clone(),
            facebook_app_id: config.share.facebook_app_id.clone(),
            buy_me_a_coffee_id: config.sponsor.buy_me_a_coffee_id.clone(),
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_data: &SiteData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("meta_generator", &meta_generator());
        context.insert(
            "current_year",
            &format_date_in(&chrono::Local::now(), "YYYY", &self.blog.config.timezone),
        );
        context
    }

    /// Generate the paginated listing for all posts (`category` is `None`)
    /// or for one category
    fn generate_listing(
        &self,
        shell: &ListingShell,
        posts: &[PostSummary],
        category: Option<&str>,
    ) -> Result<()> {
        let config = &self.blog.config;
        let page_size = self.column.page_size();
        let total = listing_page_count(posts.len(), page_size);

        let (url_base, dir_base) = match category {
            Some(name) => (category_base(name), category_dir(name)),
            None => (String::new(), String::new()),
        };

        let nav_html = CategoryNav
            .render(&url_for(config, ""), shell.categories, category)
            .to_html();

        for page in 1..=total {
            let start = ((page - 1) * page_size).min(posts.len());
            let end = (start + page_size).min(posts.len());
            let page_posts = &posts[start..end];

            let current_url = url_for(config, &listing_page_path(&url_base, page));
            let more_url = url_for(config, &listing_page_path(&url_base, page + 1));
            let column_html = self.column.render(page_posts, &more_url).to_html();

            let pagination = PaginationData {
                current: page,
                total,
                current_url: current_url.clone(),
                prev_link: if page > 1 {
                    url_for(config, &listing_page_path(&url_base, page - 1))
                } else {
                    String::new()
                },
                next_link: if self.column.shows_more(page_posts.len()) {
                    more_url
                } else {
                    String::new()
                },
            };

            let page_title = match (category, page) {
                (None, 1) => String::new(),
                (None, n) => format!("Page {}", n),
                (Some(name), 1) => name.to_string(),
                (Some(name), n) => format!("{} - Page {}", name, n),
            };

            let mut context = self.create_base_context(shell.site);
            context.insert("page_title", &page_title);
            context.insert("page_description", &config.description);
            context.insert(
                "open_graph",
                &open_graph(
                    if page_title.is_empty() {
                        &config.title
                    } else {
                        &page_title
                    },
                    &config.description,
                    &full_url_for(config, &current_url),
                    None,
                    &config.title,
                    "website",
                ),
            );
            context.insert("is_home", &(category.is_none() && page == 1));
            context.insert("bio", shell.bio);
            context.insert("category_nav", &nav_html);
            context.insert("column", &column_html);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("list.html", &context)?;

            let output_path = self
                .blog
                .public_dir
                .join(listing_page_path(&dir_base, page))
                .join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated listing: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post], site_data: &SiteData, bio: &str) -> Result<()> {
        let config = &self.blog.config;

        for post in posts {
            let nav = |p: &Post| NavPost {
                title: p.title.clone(),
                path: p.path.clone(),
            };

            let summary = MarkdownRenderer::summarize(
                post.description
                    .as_deref()
                    .or(post.excerpt.as_deref())
                    .unwrap_or(&post.content),
            );

            let page_data = PostPageData {
                title: post.title.clone(),
                date: format_date_in(&post.date, &config.date_format, &config.timezone),
                category: post.category.clone(),
                category_url: url_for(config, &category_base(&post.category)),
                tags: post.tags.clone(),
                thumbnail: post.thumbnail.clone(),
                content: post.content.clone(),
            };

            let comments = Comments
                .render(&config.comment, &post.permalink, &post.slug)
                .map(|node| node.to_html());

            let mut context = self.create_base_context(site_data);
            context.insert("page_title", &post.title);
            context.insert("page_description", &summary);
            context.insert(
                "open_graph",
                &open_graph(
                    &post.title,
                    &summary,
                    &post.permalink,
                    post.thumbnail.as_deref(),
                    &config.title,
                    "article",
                ),
            );
            context.insert("post", &page_data);
            context.insert("bio", bio);
            context.insert("comments", &comments);
            if let Some(prev) = post.prev(posts) {
                context.insert("prev_post", &nav(prev));
            }
            if let Some(next) = post.next(posts) {
                context.insert("next_post", &nav(next));
            }

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .blog
                .public_dir
                .join(&post.slug)
                .join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate Atom feed with the newest posts
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.blog.config;
        let site_url = config.site_url.trim_end_matches('/');
        let updated = posts
            .first()
            .map(|p| date_xml(&p.date))
            .unwrap_or_else(|| date_xml(&chrono::Local::now()));

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, &url_for(config, "atom.xml"))
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\"/>\n",
            full_url_for(config, &url_for(config, ""))
        ));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}/</id>\n", site_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts.iter().take(config.configs.count_of_initial_post) {
            let content = post.excerpt.as_ref().unwrap_or(&post.content);
            let content = strip_invalid_xml_chars(&absolute_urls(content, site_url));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", post.permalink));
            feed.push_str(&format!("    <id>{}</id>\n", post.permalink));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                date_xml(&post.date)
            ));
            feed.push_str(&format!(
                "    <category term=\"{}\"/>\n",
                escape_xml(&post.category)
            ));
            // CDATA cannot contain its own terminator
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        write_file(&self.blog.public_dir.join("atom.xml"), &feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Write the built-in stylesheet
    fn write_stylesheet(&self) -> Result<()> {
        write_file(
            &self.blog.public_dir.join("css").join("style.css"),
            STYLESHEET,
        )
    }

    /// Copy non-markdown content files, the static dir and the favicon
    fn copy_assets(&self) -> Result<()> {
        copy_tree(&self.blog.content_dir, &self.blog.public_dir)?;
        copy_tree(&self.blog.base_dir.join(STATIC_DIR), &self.blog.public_dir)?;

        let icon = &self.blog.config.icon;
        if let Some(name) = icon_file_name(icon) {
            let source = self.blog.base_dir.join(icon);
            if source.is_file() {
                fs::copy(&source, self.blog.public_dir.join(name))?;
            } else {
                tracing::warn!("Icon {:?} not found", source);
            }
        }

        Ok(())
    }
}

/// Site-relative URL base of a category listing
fn category_base(name: &str) -> String {
    format!(
        "{}/{}/",
        CATEGORY_DIR,
        encode_segment(&category_segment(name))
    )
}

/// Output directory of a category listing, relative to the public dir
fn category_dir(name: &str) -> String {
    format!("{}/{}/", CATEGORY_DIR, category_segment(name))
}

fn icon_file_name(icon: &str) -> Option<String> {
    if icon.trim().is_empty() {
        return None;
    }
    Path::new(icon)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
}

/// Copy every non-markdown file under `from` into `to`, keeping layout
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str());
        if matches!(ext, Some("md") | Some("markdown")) {
            continue;
        }

        let dest = to.join(path.strip_prefix(from)?);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

lazy_static! {
    /// A root-relative href/src value; protocol-relative `//host` does not match
    static ref ROOT_RELATIVE_ATTR: Regex = Regex::new(r#"\b(href|src)="/([^/]|")"#).unwrap();
}

/// Make root-relative href/src attributes absolute for feed readers
fn absolute_urls(content: &str, base_url: &str) -> String {
    ROOT_RELATIVE_ATTR
        .replace_all(content, |caps: &Captures| {
            format!("{}=\"{}/{}", &caps[1], base_url, &caps[2])
        })
        .into_owned()
}

/// Strip characters XML 1.0 does not allow
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
