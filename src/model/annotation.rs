//! Annotation records and the line-indexed registry.

use crate::error::Result;
use crate::json::{to_json, JsonFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `[!name value]` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation name (non-whitespace run after `[!`)
    pub name: String,

    /// Opaque annotation value
    pub value: String,
}

impl Annotation {
    /// Create an annotation.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Annotations grouped by zero-based line index.
///
/// Lines without annotations have no entry. Within a line, annotations
/// keep their left-to-right discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationRegistry {
    lines: BTreeMap<usize, Vec<Annotation>>,
}

impl AnnotationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation to a line.
    pub fn push(&mut self, line: usize, annotation: Annotation) {
        self.lines.entry(line).or_default().push(annotation);
    }

    /// Annotations recorded on a line.
    pub fn get(&self, line: usize) -> Option<&[Annotation]> {
        self.lines.get(&line).map(Vec::as_slice)
    }

    /// Line indices that carry annotations, ascending.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.keys().copied()
    }

    /// Iterate `(line, annotations)` pairs in ascending line order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Annotation])> {
        self.lines.iter().map(|(line, list)| (*line, list.as_slice()))
    }

    /// All annotations with a given name, paired with their line.
    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (usize, &'a Annotation)> {
        self.lines.iter().flat_map(move |(line, list)| {
            list.iter()
                .filter(move |a| a.name == name)
                .map(move |a| (*line, a))
        })
    }

    /// Number of annotated lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of annotations across all lines.
    pub fn annotation_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Check if no annotation was recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize the registry as a JSON object keyed by line index.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Consume the registry into its underlying map.
    pub fn into_inner(self) -> BTreeMap<usize, Vec<Annotation>> {
        self.lines
    }
}
