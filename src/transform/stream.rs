//! Virtual character stream over a comment token's children.
//!
//! Highlighters split comment text into text runs and whitespace-marker
//! elements, so an annotation like `[!step one]` may span several
//! children. The stream flattens them into one string and remembers, for
//! every character, which child it came from.

use crate::model::{Annotation, Node};
use regex::Regex;

/// Annotation syntax: `[!` name, whitespace, value, `]`.
///
/// Names are a whitespace-free run. Values must start with a visible
/// character and run to the next unescaped `]`; a literal `]` is written
/// `\]`.
const ANNOTATION_PATTERN: &str = r"\[!(\S+)\s+((?:\\.|[^\\\]\s])(?:\\.|[^\\\]])*)\]";

/// Origin of one stream character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Byte range `start..end` inside a text child
    Text {
        child: usize,
        start: usize,
        end: usize,
    },
    /// A whole whitespace-marker child
    Marker { child: usize },
}

/// Flattened text of a comment token with per-character origins.
#[derive(Debug, Clone)]
pub struct CharStream {
    text: String,
    origins: Vec<Origin>,
    offsets: Vec<usize>,
}

impl CharStream {
    /// Build the stream over a token's children.
    ///
    /// Returns `None` if a child is neither text nor a whitespace marker.
    pub fn build(children: &[Node], space_class: &str) -> Option<Self> {
        let mut stream = Self {
            text: String::new(),
            origins: Vec::new(),
            offsets: Vec::new(),
        };

        for (child, node) in children.iter().enumerate() {
            match node {
                Node::Text(text) => {
                    for (start, c) in text.value.char_indices() {
                        stream.offsets.push(stream.text.len());
                        stream.text.push(c);
                        stream.origins.push(Origin::Text {
                            child,
                            start,
                            end: start + c.len_utf8(),
                        });
                    }
                }
                node if is_space_marker(node, space_class) => {
                    stream.offsets.push(stream.text.len());
                    stream.text.push(' ');
                    stream.origins.push(Origin::Marker { child });
                }
                _ => return None,
            }
        }

        Some(stream)
    }

    /// The flattened text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the stream.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Check if the stream is empty.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Origin of the character at `index`.
    pub fn origin(&self, index: usize) -> Origin {
        self.origins[index]
    }

    /// Character index of a byte offset in [`CharStream::text`].
    pub fn char_index(&self, byte: usize) -> usize {
        self.offsets.partition_point(|&offset| offset < byte)
    }
}

/// Check whether a node is a whitespace marker.
pub fn is_space_marker(node: &Node, space_class: &str) -> bool {
    node.as_element().is_some_and(|el| el.has_class(space_class))
}

/// Literal text at the start of a token.
///
/// Text children and whitespace markers are concatenated until the first
/// child that is neither.
pub fn leading_text(children: &[Node], space_class: &str) -> String {
    let mut leading = String::new();
    for node in children {
        match node {
            Node::Text(text) => leading.push_str(&text.value),
            node if is_space_marker(node, space_class) => leading.push(' '),
            _ => break,
        }
    }
    leading
}

/// One annotation found in a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// First character index of the marker (the `[`)
    pub start: usize,

    /// Character index one past the closing `]`
    pub end: usize,

    /// Parsed annotation
    pub annotation: Annotation,
}

/// Finds annotation markers in character streams.
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: Regex,
}

impl Scanner {
    /// Create a scanner.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ANNOTATION_PATTERN).unwrap(),
        }
    }

    /// Find all non-overlapping annotations, left to right.
    ///
    /// Markers rejected by `accept` are left in place as ordinary text.
    pub fn scan(&self, stream: &CharStream, accept: impl Fn(&str) -> bool) -> Vec<Match> {
        self.pattern
            .captures_iter(stream.text())
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str();
                if !accept(name) {
                    log::trace!("Ignoring annotation `{}` rejected by name filter", name);
                    return None;
                }
                let value = unescape(caps.get(2)?.as_str());
                Some(Match {
                    start: stream.char_index(whole.start()),
                    end: stream.char_index(whole.end()),
                    annotation: Annotation::new(name, value),
                })
            })
            .collect()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn unescape(value: &str) -> String {
    value.replace("\\]", "]")
}
