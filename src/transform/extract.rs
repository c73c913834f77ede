//! Annotation extraction over a normalized code block.

use super::collapse::wraps_expression;
use super::stream::{leading_text, CharStream, Scanner};
use super::strip::{strip, StripOutcome};
use crate::model::{AnnotationRegistry, Element, Node, Root};
use crate::options::{BlockShape, ExtractOptions};
use crate::scope::{MarkerTable, ScopeMarkers};
use serde::{Deserialize, Serialize};

/// Statistics collected during one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of line containers visited
    pub line_count: u32,

    /// Number of comment tokens seen
    pub comment_count: u32,

    /// Number of comment tokens whose opening marker was recognized
    pub recognized_count: u32,

    /// Number of annotations extracted
    pub annotation_count: u32,

    /// Number of comment tokens trimmed down to their remaining prose
    pub stripped_count: u32,

    /// Number of comment tokens deleted outright
    pub removed_count: u32,

    /// Number of embedded-expression wrappers deleted
    pub collapsed_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the pass changed the tree.
    pub fn modified(&self) -> bool {
        self.stripped_count > 0 || self.removed_count > 0
    }
}

/// Annotations and statistics from one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Line-indexed annotations
    pub annotations: AnnotationRegistry,

    /// Pass statistics
    pub stats: ExtractionStats,
}

enum TokenAction {
    Keep,
    Replace(Vec<Node>),
    Remove,
}

/// Extracts annotations from comment tokens and strips them from the tree.
pub struct Extractor<'a> {
    markers: &'a MarkerTable,
    options: &'a ExtractOptions,
    scanner: &'a Scanner,
}

impl<'a> Extractor<'a> {
    /// Create an extractor over borrowed configuration.
    pub fn new(
        markers: &'a MarkerTable,
        options: &'a ExtractOptions,
        scanner: &'a Scanner,
    ) -> Self {
        Self {
            markers,
            options,
            scanner,
        }
    }

    /// Extract annotations from `root`, mutating it in place.
    ///
    /// Trees without the canonical block shape, and scopes missing from the
    /// marker table, are left untouched and yield an empty registry.
    pub fn extract(&self, root: &mut Root, scope: &str) -> Extraction {
        let mut out = Extraction::default();

        let Some(markers) = self.markers.get(scope) else {
            log::debug!("No comment markers for scope `{}`, skipping", scope);
            return out;
        };
        let Some(code) = code_container(root, &self.options.shape) else {
            log::debug!("Tree has no code block, skipping");
            return out;
        };

        let lines = code.children.iter_mut().filter_map(Node::as_element_mut);
        for (line, element) in lines.enumerate() {
            out.stats.line_count += 1;
            self.visit_children(&mut element.children, line, markers, &mut out);
        }

        log::debug!(
            "Extracted {} annotation(s) on {} line(s) from {} comment(s) in `{}`",
            out.stats.annotation_count,
            out.annotations.len(),
            out.stats.comment_count,
            scope
        );
        out
    }

    fn visit_children(
        &self,
        children: &mut Vec<Node>,
        line: usize,
        markers: &ScopeMarkers,
        out: &mut Extraction,
    ) {
        // Deletions are deferred so sibling checks see the pre-deletion sequence.
        let mut removed = vec![false; children.len()];

        for index in 0..children.len() {
            if removed[index] {
                continue;
            }
            let Node::Element(element) = &mut children[index] else {
                continue;
            };
            if !element.has_class(&self.options.comment_class) {
                self.visit_children(&mut element.children, line, markers, out);
                continue;
            }

            out.stats.comment_count += 1;
            match self.process_token(element, line, markers, out) {
                TokenAction::Keep => {}
                TokenAction::Replace(stripped) => {
                    element.children = stripped;
                    out.stats.stripped_count += 1;
                }
                TokenAction::Remove => {
                    removed[index] = true;
                    out.stats.removed_count += 1;

                    let Some(delimiters) = &markers.embedded else {
                        continue;
                    };
                    let prev = index.checked_sub(1).and_then(|i| children.get(i));
                    if wraps_expression(prev, children.get(index + 1), delimiters) {
                        log::trace!("Collapsing embedded expression on line {}", line);
                        removed[index - 1] = true;
                        removed[index + 1] = true;
                        out.stats.collapsed_count += 1;
                    }
                }
            }
        }

        let mut index = 0;
        children.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
    }

    fn process_token(
        &self,
        element: &Element,
        line: usize,
        markers: &ScopeMarkers,
        out: &mut Extraction,
    ) -> TokenAction {
        let space_class = self.options.space_class.as_str();

        let leading = leading_text(&element.children, space_class);
        let Some(marker) = markers.recognize(&leading) else {
            log::trace!("Unrecognized comment {:?} on line {}", leading, line);
            return TokenAction::Keep;
        };
        out.stats.recognized_count += 1;

        let Some(stream) = CharStream::build(&element.children, space_class) else {
            log::trace!("Comment on line {} has nested markup, skipping", line);
            return TokenAction::Keep;
        };
        let matches = self.scanner.scan(&stream, |name| self.options.accepts(name));
        if matches.is_empty() {
            return TokenAction::Keep;
        }

        let outcome = strip(&element.children, &stream, &matches, marker, space_class);

        for m in matches {
            log::trace!(
                "Line {}: [!{} {}]",
                line,
                m.annotation.name,
                m.annotation.value
            );
            out.annotations.push(line, m.annotation);
            out.stats.annotation_count += 1;
        }

        match outcome {
            StripOutcome::Stripped(children) => TokenAction::Replace(children),
            StripOutcome::Emptied => TokenAction::Remove,
        }
    }
}

/// Extract annotations with a one-off scanner.
///
/// Prefer [`crate::Callouts`] when processing many trees, as it reuses
/// the compiled annotation pattern.
pub fn extract(
    root: &mut Root,
    scope: &str,
    markers: &MarkerTable,
    options: &ExtractOptions,
) -> Extraction {
    let scanner = Scanner::new();
    Extractor::new(markers, options, &scanner).extract(root, scope)
}

fn code_container<'r>(root: &'r mut Root, shape: &BlockShape) -> Option<&'r mut Element> {
    root.children
        .iter_mut()
        .filter_map(Node::as_element_mut)
        .find(|el| el.tag_name == shape.block_tag)?
        .children
        .iter_mut()
        .filter_map(Node::as_element_mut)
        .find(|el| el.tag_name == shape.code_tag)
}
