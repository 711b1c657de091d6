//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary. Components render the page body
//! fragments; these templates only supply the page shell around them.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Built-in stylesheet, written to `css/style.css`
pub const STYLESHEET: &str = include_str!("bee/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Component output is already HTML; templates escape explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("bee/layout.html")),
            ("list.html", include_str!("bee/list.html")),
            ("post.html", include_str!("bee/post.html")),
            (
                "partials/head.html",
                include_str!("bee/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("bee/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("bee/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("escape_attr", escape_attr_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Tera filter: escape a value for a quoted attribute, leaving `/` as is
fn escape_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_attr", "value", String, value);
    Ok(tera::Value::String(crate::helpers::html_escape(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(crate::helpers::truncate(
        s.trim(),
        length,
        Some(&omission),
    )))
}

/// Site-wide values every page shell needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub keywords: String,
    pub home: String,
    pub icon: String,
    pub stylesheet: String,
    pub feed: String,
    /// Analytics id, empty when disabled
    pub ga: String,
    pub ad: String,
    pub facebook_app_id: String,
    pub buy_me_a_coffee_id: String,
}

/// Links between listing pages
#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub current: usize,
    pub total: usize,
    pub current_url: String,
    pub prev_link: String,
    pub next_link: String,
}

/// A post as shown on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub date: String,
    pub category: String,
    pub category_url: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData {
            title: "Tom & Jerry".to_string(),
            description: String::new(),
            author: "hangjoo".to_string(),
            language: "ko".to_string(),
            keywords: "blog".to_string(),
            home: "/".to_string(),
            icon: String::new(),
            stylesheet: "/css/style.css".to_string(),
            feed: "/atom.xml".to_string(),
            ga: String::new(),
            ad: String::new(),
            facebook_app_id: String::new(),
            buy_me_a_coffee_id: "jbee".to_string(),
        }
    }

    #[test]
    fn test_render_list_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("page_title", "");
        context.insert("page_description", "<p>A blog</p>");
        context.insert("open_graph", "");
        context.insert("meta_generator", "");
        context.insert("current_year", "2021");
        context.insert("is_home", &true);
        context.insert("bio", "<div class=\"bio\"></div>");
        context.insert("category_nav", "");
        context.insert("column", "<div class=\"post-cards-column-wrapper\"></div>");
        context.insert(
            "pagination",
            &PaginationData {
                current: 1,
                total: 1,
                current_url: "/".to_string(),
                prev_link: String::new(),
                next_link: String::new(),
            },
        );

        let html = renderer.render("list.html", &context).unwrap();
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains(r#"<meta name="description" content="A blog">"#));
        assert!(html.contains(r#"<div class="post-cards-column-wrapper"></div>"#));
        assert!(html.contains(r#"<div class="bio"></div>"#));
        assert!(html.contains("buymeacoffee.com/jbee"));
        assert!(!html.contains("googletagmanager"));
        assert!(!html.contains("prev-page"));
    }

    #[test]
    fn test_render_post_page_escapes_attributes() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        let mut site = site();
        site.icon = "/icon\".png".to_string();
        context.insert("site", &site);
        context.insert("page_title", "Quotes");
        context.insert("page_description", "");
        context.insert("open_graph", "");
        context.insert("meta_generator", "");
        context.insert("current_year", "2021");
        context.insert("bio", "");
        context.insert("comments", &Option::<String>::None);
        context.insert(
            "post",
            &PostPageData {
                title: "Quotes".to_string(),
                date: "March 04, 2021".to_string(),
                category: "dev".to_string(),
                category_url: "/categories/dev/".to_string(),
                tags: vec![],
                thumbnail: Some("/img/a\" onerror=\"x.png".to_string()),
                content: "<p>Body</p>".to_string(),
            },
        );
        context.insert(
            "prev_post",
            &NavPost {
                title: "Older".to_string(),
                path: "/older/".to_string(),
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains(r#"src="/img/a&quot; onerror=&quot;x.png""#));
        assert!(html.contains(r#"href="/icon&quot;.png""#));
        assert!(html.contains(r#"href="/categories/dev/""#));
        assert!(html.contains(r#"href="/older/""#));
        assert!(!html.contains(r#"onerror=""#));
    }

    #[test]
    fn test_render_list_page_escapes_prev_link() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("page_title", "Page 2");
        context.insert("page_description", "");
        context.insert("open_graph", "");
        context.insert("meta_generator", "");
        context.insert("current_year", "2021");
        context.insert("is_home", &false);
        context.insert("bio", "");
        context.insert("category_nav", "");
        context.insert("column", "");
        context.insert(
            "pagination",
            &PaginationData {
                current: 2,
                total: 2,
                current_url: "/posts/2/".to_string(),
                prev_link: "/categories/a\"b/".to_string(),
                next_link: String::new(),
            },
        );

        let html = renderer.render("list.html", &context).unwrap();
        assert!(html.contains(r#"<a class="prev-page" href="/categories/a&quot;b/">"#));
    }

    #[test]
    fn test_truncate_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out = truncate_chars_filter(&tera::Value::from("abcdefgh"), &args).unwrap();
        assert_eq!(out, tera::Value::from("ab..."));
    }
}
