//! Author bio with social links

use super::node::{Element, Node};
use crate::config::SiteConfig;

pub struct Bio;

impl Bio {
    pub fn render(&self, config: &SiteConfig) -> Node {
        let links = config.social.links().into_iter().map(|(name, url)| {
            Element::new("a")
                .class(&format!("social-link {}", name))
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .text(name)
        });

        Element::new("div")
            .class("bio")
            .child(
                Element::new("div")
                    .class("introduction")
                    .child(Element::new("strong").class("author").text(config.author.as_str()))
                    .child(Element::new("p").text(config.introduction.as_str())),
            )
            .child(Element::new("div").class("social-links").children(links))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bio_lists_configured_accounts() {
        let mut config = SiteConfig::default();
        config.author = "hangjoo".to_string();
        config.introduction = ":D".to_string();
        config.social.github = "hangjoo".to_string();

        let node = Bio.render(&config);
        let links = node.find_by_class("social-link");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attr("href"), Some("https://github.com/hangjoo"));
        assert!(node.to_html().contains("<strong class=\"author\">hangjoo</strong>"));
    }
}
