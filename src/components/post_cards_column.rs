//! Post cards column: a page of post cards with a "More" link once full

use super::more_button::MoreButton;
use super::node::{Element, Node};
use super::post_card::{CardRenderer, PostCard};
use crate::content::PostSummary;

/// Number of cards that makes a column full
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Renders an ordered list of post summaries as a column of cards.
///
/// Callers pass at most one page of posts. The "More" link appears only when
/// the column holds exactly `page_size` cards; a shorter column is the last
/// page, and a longer one gets no link at all.
#[derive(Debug, Clone)]
pub struct PostCardsColumn<R = PostCard> {
    page_size: usize,
    card: R,
    more: MoreButton,
}

impl PostCardsColumn<PostCard> {
    pub fn new(page_size: usize) -> Self {
        Self::with_renderer(page_size, PostCard)
    }
}

impl Default for PostCardsColumn<PostCard> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R: CardRenderer> PostCardsColumn<R> {
    pub fn with_renderer(page_size: usize, card: R) -> Self {
        Self {
            page_size,
            card,
            more: MoreButton,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a column of `len` cards shows the "More" link
    pub fn shows_more(&self, len: usize) -> bool {
        len == self.page_size
    }

    /// Render the column. Input order is kept and duplicates are rendered.
    pub fn render(&self, posts: &[PostSummary], more_url: &str) -> Node {
        let mut column = Element::new("div")
            .class("post-cards-column")
            .children(posts.iter().map(|post| self.card.render_card(post)));

        if self.shows_more(posts.len()) {
            column = column.child(self.more.render(more_url));
        }

        Element::new("div")
            .class("post-cards-column-wrapper")
            .child(column)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(ids: &[&str]) -> Vec<PostSummary> {
        ids.iter().map(|id| PostSummary::with_id(*id)).collect()
    }

    fn card_keys(node: &Node) -> Vec<String> {
        node.find_by_class("post-card")
            .iter()
            .filter_map(|e| e.get_attr("key"))
            .map(str::to_string)
            .collect()
    }

    fn more_links(node: &Node) -> Vec<String> {
        node.find_by_class(MoreButton::CLASS)
            .iter()
            .filter_map(|e| e.get_attr("href"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_full_page_shows_more() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        let node = column.render(&summaries(&["a", "b", "c", "d"]), "/posts/2");

        assert_eq!(card_keys(&node), vec!["a", "b", "c", "d"]);
        assert_eq!(more_links(&node), vec!["/posts/2"]);
    }

    #[test]
    fn test_short_page_has_no_more() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        for len in 0..DEFAULT_PAGE_SIZE {
            let ids: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let posts: Vec<_> = ids.iter().map(PostSummary::with_id).collect();
            let node = column.render(&posts, "/posts/2");
            assert_eq!(card_keys(&node).len(), len);
            assert!(more_links(&node).is_empty(), "len {}", len);
        }
    }

    #[test]
    fn test_oversized_page_has_no_more() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        let node = column.render(&summaries(&["a", "b", "c", "d", "e"]), "/posts/2");
        assert_eq!(card_keys(&node).len(), 5);
        assert!(more_links(&node).is_empty());
    }

    #[test]
    fn test_empty_keeps_container() {
        let node = PostCardsColumn::new(DEFAULT_PAGE_SIZE).render(&[], "/posts/2");
        assert_eq!(
            node.to_html(),
            r#"<div class="post-cards-column-wrapper"><div class="post-cards-column"></div></div>"#
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        let posts = summaries(&["a", "b", "c", "d"]);
        assert_eq!(column.render(&posts, "/next"), column.render(&posts, "/next"));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        let node = column.render(&summaries(&["c", "a", "c"]), "/next");
        assert_eq!(card_keys(&node), vec!["c", "a", "c"]);
    }

    #[test]
    fn test_more_comes_after_cards() {
        let column = PostCardsColumn::new(DEFAULT_PAGE_SIZE);
        let node = column.render(&summaries(&["a", "b", "c", "d"]), "/n");
        let inner = node.find_by_class("post-cards-column")[0];
        let last = inner.child_elements().last().unwrap();
        assert!(last.has_class(MoreButton::CLASS));
    }

    #[test]
    fn test_configured_page_size() {
        let column = PostCardsColumn::new(2);
        assert!(column.shows_more(2));
        assert!(!column.shows_more(4));
        let node = column.render(&summaries(&["a", "b"]), "/posts/2/");
        assert_eq!(more_links(&node), vec!["/posts/2/"]);
    }

    #[test]
    fn test_custom_card_renderer() {
        struct Plain;
        impl CardRenderer for Plain {
            fn render_card(&self, post: &PostSummary) -> Node {
                Element::new("li")
                    .class("post-card")
                    .attr("key", post.id.as_str())
                    .into()
            }
        }

        let column = PostCardsColumn::with_renderer(1, Plain);
        let node = column.render(&summaries(&["only"]), "/more");
        assert!(node.to_html().contains(r#"<li class="post-card" key="only"></li>"#));
        assert_eq!(more_links(&node), vec!["/more"]);
    }
}
