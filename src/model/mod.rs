//! Tree and annotation types.
//!
//! The node types mirror the markup tree a syntax highlighter emits; the
//! annotation types hold what the extractor pulls out of that tree.

mod annotation;
mod node;

pub use annotation::{Annotation, AnnotationRegistry};
pub use node::{Comment, Element, Node, Properties, PropertyValue, Root, Text, CLASS_NAME};
