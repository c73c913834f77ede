//! # code-callouts
//!
//! Inline callout annotations for syntax-highlighted code.
//!
//! Highlighters turn source code into a markup tree of classified tokens.
//! This library post-processes that tree: it finds `[!name value]`
//! markers written inside source comments, records them per line, and
//! removes them from the rendered output.
//!
//! ## Quick Start
//!
//! ```
//! use code_callouts::{Callouts, Element, Root, Text};
//!
//! let comment = Element::new("span")
//!     .with_class("comment")
//!     .with_child(Text::new("// [!step open the file]"));
//! let mut root = Root::new(vec![comment.into()]);
//!
//! let extraction = Callouts::new().process(&mut root, "source.js");
//! let step = &extraction.annotations.get(0).unwrap()[0];
//! assert_eq!(step.name, "step");
//! assert_eq!(step.value, "open the file");
//! ```
//!
//! ## Features
//!
//! - **Split-token matching**: markers may span text runs and whitespace markers
//! - **Prose preservation**: comment text around annotations is kept, with spacing normalized
//! - **Embedded expressions**: JSX-style `{/* [!a v] */}` wrappers are removed as a whole
//! - **Per-scope markers**: only comments using the scope's comment syntax are touched
//! - **hast JSON**: trees and registries (de)serialize with serde
//! - **Batch processing**: independent trees are processed in parallel with Rayon

pub mod error;
pub mod json;
pub mod model;
pub mod options;
pub mod scope;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use json::JsonFormat;
pub use model::{
    Annotation, AnnotationRegistry, Comment, Element, Node, Properties, PropertyValue, Root, Text,
};
pub use options::{BlockShape, ExtractOptions};
pub use scope::{CommentMarker, Delimiters, MarkerTable, ScopeMarkers};
pub use transform::{extract, normalize, Extraction, ExtractionStats, Extractor, Scanner};

use rayon::prelude::*;

/// Extract annotations from a highlighted tree using the built-in scopes.
///
/// The tree is normalized and stripped in place.
///
/// # Example
///
/// ```
/// use code_callouts::{extract_annotations, Element, Root, Text};
///
/// let mut root = Root::new(vec![Element::new("span")
///     .with_class("comment")
///     .with_child(Text::new("# [!mark hot path]"))
///     .into()]);
///
/// let annotations = extract_annotations(&mut root, "source.python");
/// assert_eq!(annotations.annotation_count(), 1);
/// ```
pub fn extract_annotations(root: &mut Root, scope: &str) -> AnnotationRegistry {
    Callouts::new().process(root, scope).annotations
}

/// Process a hast JSON tree using the built-in scopes.
///
/// Returns the transformed tree as compact JSON together with the
/// extracted annotations.
pub fn process_json(json: &str, scope: &str) -> Result<(String, AnnotationRegistry)> {
    let (root, extraction) = Callouts::new().process_json(json, scope)?;
    let tree = root.to_json(JsonFormat::Compact)?;
    Ok((tree, extraction.annotations))
}

/// Builder for normalizing trees and extracting annotations.
///
/// Holds the marker table, options and compiled annotation pattern so
/// they can be reused across many trees.
///
/// # Example
///
/// ```
/// use code_callouts::{Callouts, CommentMarker, ScopeMarkers};
///
/// let callouts = Callouts::new()
///     .with_scope("source.lisp", ScopeMarkers::new(vec![CommentMarker::line(";")]))
///     .with_names(["step", "mark"])
///     .sequential();
/// assert!(callouts.markers().contains("source.lisp"));
/// ```
#[derive(Debug, Clone)]
pub struct Callouts {
    options: ExtractOptions,
    markers: MarkerTable,
    scanner: Scanner,
}

impl Callouts {
    /// Create a builder with the built-in marker table and default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            markers: MarkerTable::default(),
            scanner: Scanner::new(),
        }
    }

    /// Replace the extract options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the marker table.
    pub fn with_markers(mut self, markers: MarkerTable) -> Self {
        self.markers = markers;
        self
    }

    /// Add or replace one scope in the marker table.
    pub fn with_scope(mut self, scope: impl Into<String>, markers: ScopeMarkers) -> Self {
        self.markers.insert(scope, markers);
        self
    }

    /// Restrict extraction to the given annotation names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_names(names);
        self
    }

    /// Set the comment class token.
    pub fn with_comment_class(mut self, class: impl Into<String>) -> Self {
        self.options = self.options.with_comment_class(class);
        self
    }

    /// Set the whitespace-marker class token.
    pub fn with_space_class(mut self, class: impl Into<String>) -> Self {
        self.options = self.options.with_space_class(class);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The extract options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// The marker table.
    pub fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    /// Normalize `root` (if enabled) and extract its annotations in place.
    pub fn process(&self, root: &mut Root, scope: &str) -> Extraction {
        if self.options.normalize {
            normalize(root, &self.options.shape);
        }
        Extractor::new(&self.markers, &self.options, &self.scanner).extract(root, scope)
    }

    /// Parse a hast JSON tree and process it.
    pub fn process_json(&self, json: &str, scope: &str) -> Result<(Root, Extraction)> {
        let mut root = Root::from_json(json)?;
        let extraction = self.process(&mut root, scope);
        Ok((root, extraction))
    }

    /// Process many independent `(tree, scope)` pairs.
    ///
    /// Results are returned in input order. Trees are processed in
    /// parallel unless the builder is sequential.
    pub fn process_batch(&self, items: &mut [(Root, String)]) -> Vec<Extraction> {
        if self.options.parallel {
            items
                .par_iter_mut()
                .map(|(root, scope)| self.process(root, scope.as_str()))
                .collect()
        } else {
            items
                .iter_mut()
                .map(|(root, scope)| self.process(root, scope.as_str()))
                .collect()
        }
    }
}

impl Default for Callouts {
    fn default() -> Self {
        Self::new()
    }
}
