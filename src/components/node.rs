//! Render tree produced by components

use std::fmt::Write;

use crate::helpers::html_escape;

/// Elements that never have children or a closing tag
const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

/// A node in the render tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output
    Text(String),
    /// Trusted HTML fragment, emitted verbatim
    Raw(String),
}

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Value of an attribute
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Direct child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// All elements in document order (pre-order) matching `pred`
    pub fn find_all<'a, F>(&'a self, pred: F) -> Vec<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.collect(&pred, &mut found);
        found
    }

    fn collect<'a, F>(&'a self, pred: &F, found: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if let Node::Element(e) = self {
            if pred(e) {
                found.push(e);
            }
            for child in &e.children {
                child.collect(pred, found);
            }
        }
    }

    /// All elements carrying `class`
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    // Writing to a String cannot fail
                    let _ = write!(out, r#" {}="{}""#, name, html_escape(value));
                }
                out.push('>');

                if VOID_TAGS.contains(&e.tag) {
                    return;
                }

                for child in &e.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text_and_attrs() {
        let node: Node = Element::new("a")
            .attr("href", "/search?q=a&b")
            .text("<More>")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<a href="/search?q=a&amp;b">&lt;More&gt;</a>"#
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        let node: Node = Element::new("div")
            .child(Node::Raw("<p>ok</p>".to_string()))
            .into();
        assert_eq!(node.to_html(), "<div><p>ok</p></div>");
    }

    #[test]
    fn test_void_tag() {
        let node: Node = Element::new("img").attr("src", "/a.png").into();
        assert_eq!(node.to_html(), r#"<img src="/a.png">"#);
    }

    #[test]
    fn test_attr_replaces() {
        let e = Element::new("div").class("a").class("b");
        assert_eq!(e.attrs.len(), 1);
        assert!(e.has_class("b"));
        assert!(!e.has_class("a"));
    }

    #[test]
    fn test_find_by_class_in_document_order() {
        let node: Node = Element::new("ul")
            .child(Element::new("li").class("item").attr("id", "1"))
            .child(
                Element::new("li")
                    .class("item")
                    .attr("id", "2")
                    .child(Element::new("span").class("item").attr("id", "3")),
            )
            .into();
        let ids: Vec<_> = node
            .find_by_class("item")
            .iter()
            .filter_map(|e| e.get_attr("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
