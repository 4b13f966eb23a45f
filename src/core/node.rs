//! Output tree
//!
//! A minimal labeled tree: every node has a tag, optional text, an ordered
//! attribute map and child nodes. Hosts walk it to produce markup.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Node label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "kebab-case"))]
pub enum Tag {
    /// Root of a parsed document (host side)
    Document,
    /// Block of text no processor claimed (host side)
    Paragraph,
    Table,
    HeaderSection,
    BodySection,
    Row,
    HeaderCell,
    DataCell,
}

impl Tag {
    /// Abstract tag name
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Document => "document",
            Tag::Paragraph => "paragraph",
            Tag::Table => "table",
            Tag::HeaderSection => "header-section",
            Tag::BodySection => "body-section",
            Tag::Row => "row",
            Tag::HeaderCell => "header-cell",
            Tag::DataCell => "data-cell",
        }
    }

    /// Markup element name for hosts that emit HTML
    pub fn html_name(&self) -> &'static str {
        match self {
            Tag::Document => "div",
            Tag::Paragraph => "p",
            Tag::Table => "table",
            Tag::HeaderSection => "thead",
            Tag::BodySection => "tbody",
            Tag::Row => "tr",
            Tag::HeaderCell => "th",
            Tag::DataCell => "td",
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Tag::HeaderCell | Tag::DataCell)
    }
}

/// A node of the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Node {
    tag: Tag,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    text: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "IndexMap::is_empty"))]
    attributes: IndexMap<String, String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Node {
            tag,
            text: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Root node for a host document
    pub fn document() -> Self {
        Node::new(Tag::Document)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Set an attribute, keeping the position of an existing one
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Append a child and return it for further building
    pub fn push(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// All descendants with the given tag, in document order
    pub fn find_all(&self, tag: Tag) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: Tag, found: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.tag == tag {
                found.push(child);
            }
            child.collect(tag, found);
        }
    }

    /// Numeric attribute such as `colspan`, defaulting to 1
    pub fn span(&self, name: &str) -> usize {
        self.attribute(name)
            .and_then(|value| value.parse().ok())
            .unwrap_or(1)
    }
}
