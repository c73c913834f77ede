//! Per-scope comment markers.
//!
//! A scope is the language identifier a highlighter attaches to its
//! output (e.g. `source.tsx`). The marker table maps each scope to the
//! comment-opening sequences that gate annotation extraction, and
//! optionally to the punctuation that wraps embedded-expression comments.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A comment syntax: an opening sequence and, for block comments, a closing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMarker {
    /// Opening sequence such as `//` or `/*`
    pub open: String,

    /// Closing sequence such as `*/`; `None` for line comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

impl CommentMarker {
    /// A comment running to the end of the line.
    pub fn line(open: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: None,
        }
    }

    /// A comment with explicit open and close sequences.
    pub fn block(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: Some(close.into()),
        }
    }

    /// Check whether `body` (the full comment text) holds nothing but this
    /// marker's own delimiters and whitespace.
    pub fn is_bare(&self, body: &str) -> bool {
        let Some(rest) = body.strip_prefix(self.open.as_str()) else {
            return false;
        };
        let rest = rest.trim();
        match &self.close {
            Some(close) => rest.strip_suffix(close.as_str()).unwrap_or(rest).trim().is_empty(),
            None => rest.is_empty(),
        }
    }
}

/// Punctuation that wraps an embedded-expression comment, e.g. `{` and `}` in JSX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Opening punctuation
    pub open: String,
    /// Closing punctuation
    pub close: String,
}

impl Delimiters {
    /// Create a delimiter pair.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Comment syntax recognized within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMarkers {
    /// Recognized comment markers
    pub markers: Vec<CommentMarker>,

    /// Embedded-expression wrapper, if the language has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Delimiters>,
}

impl ScopeMarkers {
    /// Create a marker set without an embedded-expression wrapper.
    pub fn new(markers: Vec<CommentMarker>) -> Self {
        Self {
            markers,
            embedded: None,
        }
    }

    /// Set the embedded-expression wrapper.
    pub fn with_embedded(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.embedded = Some(Delimiters::new(open, close));
        self
    }

    /// The marker that opens `leading`, preferring the longest opening sequence.
    pub fn recognize(&self, leading: &str) -> Option<&CommentMarker> {
        self.markers
            .iter()
            .filter(|m| !m.open.is_empty() && leading.starts_with(m.open.as_str()))
            .max_by_key(|m| m.open.len())
    }

    fn c_style() -> Self {
        Self::new(vec![
            CommentMarker::line("//"),
            CommentMarker::block("/*", "*/"),
        ])
    }

    fn hash() -> Self {
        Self::new(vec![CommentMarker::line("#")])
    }

    fn dash() -> Self {
        Self::new(vec![CommentMarker::line("--")])
    }

    fn html() -> Self {
        Self::new(vec![CommentMarker::block("<!--", "-->")])
    }
}

/// Read-only mapping from scope to recognized comment markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerTable {
    scopes: HashMap<String, ScopeMarkers>,
}

impl MarkerTable {
    /// Create a table with no scopes.
    pub fn empty() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }

    /// Add or replace a scope and return the table.
    pub fn with_scope(mut self, scope: impl Into<String>, markers: ScopeMarkers) -> Self {
        self.insert(scope, markers);
        self
    }

    /// Add or replace a scope.
    pub fn insert(&mut self, scope: impl Into<String>, markers: ScopeMarkers) {
        self.scopes.insert(scope.into(), markers);
    }

    /// Markers for a scope.
    pub fn get(&self, scope: &str) -> Option<&ScopeMarkers> {
        self.scopes.get(scope)
    }

    /// Check if a scope is known.
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains_key(scope)
    }

    /// Known scope identifiers, sorted.
    pub fn scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<&str> = self.scopes.keys().map(String::as_str).collect();
        scopes.sort_unstable();
        scopes
    }

    /// Parse a table from JSON and validate it.
    ///
    /// ```
    /// use code_callouts::MarkerTable;
    ///
    /// let table = MarkerTable::from_json(
    ///     r#"{"source.lua": {"markers": [{"open": "--"}]}}"#,
    /// ).unwrap();
    /// assert!(table.contains("source.lua"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check every scope has at least one marker and no marker or delimiter is empty.
    pub fn validate(&self) -> Result<()> {
        for scope in self.scopes() {
            let markers = &self.scopes[scope];
            if markers.markers.is_empty() {
                return Err(Error::InvalidMarkerTable(format!(
                    "scope `{}` has no markers",
                    scope
                )));
            }
            for marker in &markers.markers {
                if marker.open.is_empty() {
                    return Err(Error::InvalidMarkerTable(format!(
                        "scope `{}` has an empty opening marker",
                        scope
                    )));
                }
                if marker.close.as_deref() == Some("") {
                    return Err(Error::InvalidMarkerTable(format!(
                        "scope `{}` has an empty closing marker after `{}`",
                        scope, marker.open
                    )));
                }
            }
            if let Some(embedded) = &markers.embedded {
                if embedded.open.is_empty() || embedded.close.is_empty() {
                    return Err(Error::InvalidMarkerTable(format!(
                        "scope `{}` has empty embedded-expression delimiters",
                        scope
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MarkerTable {
    /// Built-in scopes for common languages.
    fn default() -> Self {
        let mut table = Self::empty();

        for scope in ["source.js", "source.ts"] {
            table.insert(scope, ScopeMarkers::c_style());
        }
        for scope in ["source.jsx", "source.tsx", "source.js.jsx"] {
            table.insert(scope, ScopeMarkers::c_style().with_embedded("{", "}"));
        }
        table.insert(
            "source.mdx",
            ScopeMarkers::new(vec![
                CommentMarker::block("/*", "*/"),
                CommentMarker::line("//"),
                CommentMarker::block("<!--", "-->"),
            ])
            .with_embedded("{", "}"),
        );
        for scope in [
            "source.rust",
            "source.go",
            "source.c",
            "source.cpp",
            "source.cs",
            "source.java",
            "source.kotlin",
            "source.swift",
            "source.scss",
        ] {
            table.insert(scope, ScopeMarkers::c_style());
        }
        table.insert(
            "source.css",
            ScopeMarkers::new(vec![CommentMarker::block("/*", "*/")]),
        );
        for scope in [
            "source.python",
            "source.shell",
            "source.ruby",
            "source.yaml",
            "source.toml",
        ] {
            table.insert(scope, ScopeMarkers::hash());
        }
        for scope in ["source.sql", "source.lua", "source.haskell"] {
            table.insert(scope, ScopeMarkers::dash());
        }
        for scope in ["text.html.basic", "text.xml", "text.md"] {
            table.insert(scope, ScopeMarkers::html());
        }

        table
    }
}
