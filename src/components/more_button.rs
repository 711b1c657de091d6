//! "More" affordance shown under a full column

use super::node::{Element, Node};

/// Link to the next page of cards. The url is passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoreButton;

impl MoreButton {
    pub const CLASS: &'static str = "more-post-cards-button";

    pub fn render(&self, url: &str) -> Node {
        Element::new("a")
            .class(Self::CLASS)
            .attr("href", url)
            .attr("role", "button")
            .text("More")
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_button() {
        let node = MoreButton.render("/posts/2/");
        assert_eq!(
            node.to_html(),
            r#"<a class="more-post-cards-button" href="/posts/2/" role="button">More</a>"#
        );
    }

    #[test]
    fn test_url_not_validated() {
        let node = MoreButton.render("not a url");
        assert_eq!(node.as_element().unwrap().get_attr("href"), Some("not a url"));
    }
}
