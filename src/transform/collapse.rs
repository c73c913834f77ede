//! Embedded-expression collapse.
//!
//! Some languages wrap comments in expression punctuation, e.g. JSX
//! `{/* ... */}`. Once such a comment has been fully consumed by
//! annotations, the surrounding `{` and `}` tokens are dead weight and
//! are removed together with it.

use crate::model::{Element, Node};
use crate::scope::Delimiters;

/// Check whether `prev` and `next` are exactly the wrapper tokens.
///
/// Each must be an element whose only child is a text node equal to the
/// corresponding delimiter. Anything else means no collapse.
pub fn wraps_expression(
    prev: Option<&Node>,
    next: Option<&Node>,
    delimiters: &Delimiters,
) -> bool {
    is_delimiter(prev, &delimiters.open) && is_delimiter(next, &delimiters.close)
}

fn is_delimiter(node: Option<&Node>, expected: &str) -> bool {
    node.and_then(Node::as_element)
        .and_then(Element::single_text)
        == Some(expected)
}
