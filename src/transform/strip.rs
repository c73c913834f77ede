//! Removal of matched annotation text from a comment token.

use super::stream::{is_space_marker, CharStream, Match, Origin};
use crate::model::Node;
use crate::scope::CommentMarker;

/// What is left of a comment token after stripping its annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum StripOutcome {
    /// User content survived; these are the token's new children
    Stripped(Vec<Node>),
    /// Only the comment delimiters survived; the token should be deleted
    Emptied,
}

/// Remove every matched character range from `children`.
///
/// `stream` must have been built over `children` before any mutation.
/// Text children are truncated (or split) around removed ranges and
/// whitespace markers inside a range are dropped. Leftover whitespace
/// markers are then collapsed.
pub fn strip(
    children: &[Node],
    stream: &CharStream,
    matches: &[Match],
    marker: &CommentMarker,
    space_class: &str,
) -> StripOutcome {
    let mut removed = vec![false; stream.len()];
    for m in matches {
        removed[m.start..m.end].fill(true);
    }

    // Surviving byte ranges per text child, and survival per marker child.
    let mut kept_ranges: Vec<Vec<(usize, usize)>> = vec![Vec::new(); children.len()];
    let mut touched = vec![false; children.len()];
    let mut marker_kept = vec![true; children.len()];

    for (index, is_removed) in removed.iter().enumerate() {
        match stream.origin(index) {
            Origin::Text { child, start, end } => {
                if *is_removed {
                    touched[child] = true;
                    continue;
                }
                match kept_ranges[child].last_mut() {
                    Some(last) if last.1 == start => last.1 = end,
                    _ => kept_ranges[child].push((start, end)),
                }
            }
            Origin::Marker { child } => {
                if *is_removed {
                    marker_kept[child] = false;
                }
            }
        }
    }

    let mut rebuilt = Vec::with_capacity(children.len());
    for (child, node) in children.iter().enumerate() {
        match node {
            Node::Text(text) if touched[child] => {
                for &(start, end) in &kept_ranges[child] {
                    rebuilt.push(Node::text(&text.value[start..end]));
                }
            }
            _ if marker_kept[child] => rebuilt.push(node.clone()),
            _ => {}
        }
    }

    let rebuilt = collapse_spaces(rebuilt, space_class);

    if marker.is_bare(&visible_text(&rebuilt, space_class)) {
        StripOutcome::Emptied
    } else {
        StripOutcome::Stripped(rebuilt)
    }
}

/// Drop whitespace markers at either end and merge adjacent ones.
pub fn collapse_spaces(nodes: Vec<Node>, space_class: &str) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if is_space_marker(&node, space_class)
            && out
                .last()
                .map_or(true, |last| is_space_marker(last, space_class))
        {
            continue;
        }
        out.push(node);
    }
    while out
        .last()
        .is_some_and(|last| is_space_marker(last, space_class))
    {
        out.pop();
    }
    out
}

fn visible_text(nodes: &[Node], space_class: &str) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => text.value.clone(),
            node if is_space_marker(node, space_class) => " ".to_string(),
            node => node.text_content(),
        })
        .collect()
}
