//! Comment widget for post pages

use super::node::{Element, Node};
use crate::config::CommentConfig;

const UTTERANCES_SRC: &str = "https://utteranc.es/client.js";

pub struct Comments;

impl Comments {
    /// Utterances wins over Disqus when both are configured
    pub fn render(&self, config: &CommentConfig, page_url: &str, page_id: &str) -> Option<Node> {
        if !config.utterances.trim().is_empty() {
            let script = Element::new("script")
                .attr("src", UTTERANCES_SRC)
                .attr("repo", config.utterances.trim())
                .attr("issue-term", "pathname")
                .attr("label", "comment")
                .attr("theme", "github-light")
                .attr("crossorigin", "anonymous")
                .attr("async", "true");
            return Some(Element::new("div").class("comments utterances").child(script).into());
        }

        if !config.disqus_short_name.trim().is_empty() {
            return Some(
                Element::new("div")
                    .class("comments")
                    .child(
                        Element::new("div")
                            .attr("id", "disqus_thread")
                            .attr("data-shortname", config.disqus_short_name.trim())
                            .attr("data-url", page_url)
                            .attr("data-identifier", page_id),
                    )
                    .into(),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterances() {
        let config = CommentConfig {
            utterances: "hangjoo/utterances-comment".to_string(),
            disqus_short_name: "ignored".to_string(),
        };
        let html = Comments.render(&config, "https://x/a/", "a").unwrap().to_html();
        assert!(html.contains(r#"repo="hangjoo/utterances-comment""#));
        assert!(!html.contains("disqus"));
    }

    #[test]
    fn test_disqus_fallback() {
        let config = CommentConfig {
            utterances: String::new(),
            disqus_short_name: "myblog".to_string(),
        };
        let html = Comments.render(&config, "https://x/a/", "a").unwrap().to_html();
        assert!(html.contains(r#"id="disqus_thread""#));
        assert!(html.contains(r#"data-shortname="myblog""#));
    }

    #[test]
    fn test_nothing_configured() {
        assert!(Comments.render(&CommentConfig::default(), "/", "a").is_none());
    }
}
