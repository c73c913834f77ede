//! Block normalization.
//!
//! Highlighters normally emit `block → code → line*` already. A flat tree
//! (bare tokens directly under the root) is wrapped into a single line so
//! the extractor always sees the same shape.

use crate::model::{Element, Node, Root};
use crate::options::BlockShape;

/// Wrap `root`'s children into the canonical block shape unless they already are.
///
/// Returns `true` if the tree was changed.
pub fn normalize(root: &mut Root, shape: &BlockShape) -> bool {
    if is_canonical(root, shape) {
        return false;
    }

    let mut children = std::mem::take(&mut root.children);
    let terminated = matches!(children.last(), Some(Node::Text(text)) if text.value.ends_with('\n'));
    if !terminated {
        children.push(Node::text("\n"));
    }

    log::trace!("Wrapping {} flat node(s) into a code block", children.len());

    let line = Element::new(shape.line_tag.as_str())
        .with_class(shape.line_class.as_str())
        .with_children(children);
    let code = Element::new(shape.code_tag.as_str()).with_child(line);
    let block = Element::new(shape.block_tag.as_str()).with_child(code);

    root.children = vec![block.into()];
    true
}

/// Check whether the root's single child is the block container.
pub fn is_canonical(root: &Root, shape: &BlockShape) -> bool {
    matches!(
        root.children.as_slice(),
        [Node::Element(el)] if el.tag_name == shape.block_tag
    )
}
