//! Category navigation tabs

use super::node::{Element, Node};

/// Label of the tab listing every post
pub const ALL_CATEGORY: &str = "All";

pub struct CategoryNav;

impl CategoryNav {
    /// `categories` are (name, url) pairs, already in display order.
    /// `selected` is the current category, `None` for the all-posts listing.
    pub fn render(
        &self,
        all_url: &str,
        categories: &[(String, String)],
        selected: Option<&str>,
    ) -> Node {
        let tab = |name: &str, url: &str, is_selected: bool| {
            let class = if is_selected {
                "category-tab selected"
            } else {
                "category-tab"
            };
            Element::new("li")
                .class(class)
                .child(Element::new("a").attr("href", url).text(name))
        };

        Element::new("nav")
            .class("category-nav")
            .child(
                Element::new("ul")
                    .child(tab(ALL_CATEGORY, all_url, selected.is_none()))
                    .children(categories.iter().map(|(name, url)| {
                        tab(name, url, selected == Some(name.as_str()))
                    })),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tab() {
        let categories = vec![
            ("dev".to_string(), "/categories/dev/".to_string()),
            ("life".to_string(), "/categories/life/".to_string()),
        ];

        let node = CategoryNav.render("/", &categories, Some("life"));
        let selected = node.find_by_class("selected");
        assert_eq!(selected.len(), 1);
        let link = selected[0].child_elements().next().unwrap();
        assert_eq!(link.get_attr("href"), Some("/categories/life/"));

        let node = CategoryNav.render("/", &categories, None);
        let selected = node.find_by_class("selected");
        assert_eq!(node.find_by_class("category-tab").len(), 3);
        let link = selected[0].child_elements().next().unwrap();
        assert_eq!(link.get_attr("href"), Some("/"));
    }
}
