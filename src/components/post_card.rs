//! Post card: one post summary as a clickable card

use super::node::{Element, Node};
use crate::content::PostSummary;

/// Renders a single post summary.
///
/// Implementations must not fail for any summary, and must key the card by
/// the summary's `id` so a card keeps its identity when the list changes.
pub trait CardRenderer {
    fn render_card(&self, post: &PostSummary) -> Node;
}

/// Default card: title, category, date and description
#[derive(Debug, Clone, Copy, Default)]
pub struct PostCard;

impl CardRenderer for PostCard {
    fn render_card(&self, post: &PostSummary) -> Node {
        Element::new("article")
            .class("post-card")
            .attr("key", post.id.as_str())
            .child(
                Element::new("a")
                    .class("post-card-link")
                    .attr("href", post.path.as_str())
                    .child(Element::new("h3").class("title").text(post.title.as_str()))
                    .child(
                        Element::new("div")
                            .class("info")
                            .child(
                                Element::new("span")
                                    .class("category")
                                    .text(post.category.as_str()),
                            )
                            .child(Element::new("span").class("date").text(post.date.as_str())),
                    )
                    .child(
                        Element::new("div")
                            .class("description")
                            .child(Node::Raw(post.html.clone())),
                    ),
            )
            .into()
    }
}
