//! Markup tree types.
//!
//! The shapes follow hast (the HTML abstract syntax tree used by syntax
//! highlighters) closely enough that highlighter output can be
//! deserialized directly from its JSON form.

use crate::error::{Error, Result};
use crate::json::{to_json, JsonFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property key holding an element's class tokens.
pub const CLASS_NAME: &str = "className";

/// Element properties keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean attribute
    Bool(bool),
    /// Numeric attribute
    Number(f64),
    /// String attribute
    String(String),
    /// Space- or comma-separated attribute such as `className`
    List(Vec<String>),
    /// Explicitly unset attribute
    Null,
}

/// Any node of the markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Document root
    Root(Root),
    /// Element with tag, properties and children
    Element(Element),
    /// Literal text
    Text(Text),
    /// Markup comment (not a source-language comment)
    Comment(Comment),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the text value if this node is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.value),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Root(root) => root.children.iter().for_each(|c| c.collect_text(out)),
            Node::Element(element) => element.children.iter().for_each(|c| c.collect_text(out)),
            Node::Text(text) => out.push_str(&text.value),
            Node::Comment(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// The root of a markup tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    /// Top-level nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Root {
    /// Create a root with the given children.
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Parse a root from hast JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Node>(json)? {
            Node::Root(root) => Ok(root),
            Node::Element(element) => Err(Error::InvalidTree(format!(
                "expected root, found element <{}>",
                element.tag_name
            ))),
            Node::Text(_) => Err(Error::InvalidTree("expected root, found text".to_string())),
            Node::Comment(_) => Err(Error::InvalidTree(
                "expected root, found comment".to_string(),
            )),
        }
    }

    /// Serialize this root as hast JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(
            &TaggedRoot {
                children: &self.children,
            },
            format,
        )
    }

    /// Concatenated text of the whole tree.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Borrowed view of a root, serialized with its `type` tag.
#[derive(Serialize)]
#[serde(tag = "type", rename = "root")]
struct TaggedRoot<'a> {
    children: &'a [Node],
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Tag name (e.g. `span`)
    pub tag_name: String,

    /// Properties, notably `className`
    #[serde(default)]
    pub properties: Properties,

    /// Child nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no properties or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Add a class token and return the element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Append a child and return the element.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the children and return the element.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Class tokens in declaration order.
    ///
    /// A string-valued `className` is split on whitespace.
    pub fn classes(&self) -> Vec<&str> {
        match self.properties.get(CLASS_NAME) {
            Some(PropertyValue::List(list)) => list.iter().map(String::as_str).collect(),
            Some(PropertyValue::String(s)) => s.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// Check whether the element carries a class token.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add a class token, keeping the class list free of duplicates.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        let mut list: Vec<String> = self.classes().into_iter().map(str::to_string).collect();
        if !list.contains(&class) {
            list.push(class);
        }
        self.properties
            .insert(CLASS_NAME.to_string(), PropertyValue::List(list));
    }

    /// The text of the only child, if the element has exactly one text child.
    pub fn single_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [Node::Text(text)] => Some(&text.value),
            _ => None,
        }
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// A text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// Text payload
    pub value: String,
}

impl Text {
    /// Create a text node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A markup comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment payload
    pub value: String,
}
