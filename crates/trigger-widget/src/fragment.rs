//! UI fragment tree
//!
//! Every piece of markup the widget produces is built as a [`Node`] tree.
//! Text and attribute values are escaped when they enter the tree, so a
//! fragment can never carry live markup that came from user input. The only
//! way to get a string into a node is through a constructor that escapes it.

use std::fmt::{self, Write};

/// Elements rendered without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Escape text for insertion into markup (text nodes and quoted attributes)
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of [`escape_html`], for hosts that display plain text
pub fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// A node of a UI fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Already escaped text
    Text(String),
}

impl Node {
    /// Create a text node, escaping `text`
    pub fn text(text: &str) -> Self {
        Self::Text(escape_html(text))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Render as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) -> fmt::Result {
        match self {
            Self::Text(text) => out.write_str(text),
            Self::Element(element) => element.write_html(out),
        }
    }

    /// Concatenated, unescaped text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        unescape_html(&out)
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements in document order matching `predicate`
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.visit(&mut |element| {
            if predicate(element) {
                found.push(element);
            }
        });
        found
    }

    /// All elements with the given tag name, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<&Element> {
        self.find_all(&|element: &Element| element.tag == tag)
    }

    fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a Element)) {
        if let Self::Element(element) = self {
            f(element);
            for child in &element.children {
                child.visit(f);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// An element with escaped attributes and child nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, escaping `value`
    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        let value = escape_html(value);
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute (`checked="checked"`) when `enabled`
    pub fn flag(self, name: &'static str, enabled: bool) -> Self {
        if enabled {
            self.attr(name, name)
        } else {
            self
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Append to the class list
    pub fn class(mut self, class: &str) -> Self {
        let class = escape_html(class);
        match self.attributes.iter_mut().find(|(n, _)| *n == "class") {
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(&class);
            }
            None => self.attributes.push(("class", class)),
        }
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append an escaped text node
    pub fn text(self, text: &str) -> Self {
        self.child(Node::text(text))
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Escaped attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    fn write_html(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(out, " {}=\"{}\"", name, value)?;
        }
        out.write_char('>')?;

        if VOID_ELEMENTS.contains(&self.tag) {
            return Ok(());
        }

        for child in &self.children {
            child.write_html(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}
