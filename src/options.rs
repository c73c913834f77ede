//! Extraction options and configuration.

/// Tag and class names of the canonical code-block shape.
///
/// `block → code → line*`, e.g. `<pre><code><span class="line">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockShape {
    /// Tag of the outer block container
    pub block_tag: String,

    /// Tag of the nested code container
    pub code_tag: String,

    /// Tag of each line container
    pub line_tag: String,

    /// Class added to line containers created by normalization
    pub line_class: String,
}

impl Default for BlockShape {
    fn default() -> Self {
        Self {
            block_tag: "pre".to_string(),
            code_tag: "code".to_string(),
            line_tag: "span".to_string(),
            line_class: "line".to_string(),
        }
    }
}

/// Options for extracting annotations.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Canonical tree shape
    pub shape: BlockShape,

    /// Class token marking a source-comment token
    pub comment_class: String,

    /// Class token marking a whitespace marker
    pub space_class: String,

    /// Only extract annotations with these names (`None` = all)
    pub names: Option<Vec<String>>,

    /// Whether to normalize the tree before extraction
    pub normalize: bool,

    /// Whether to process batches in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canonical tree shape.
    pub fn with_shape(mut self, shape: BlockShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the comment class token.
    pub fn with_comment_class(mut self, class: impl Into<String>) -> Self {
        self.comment_class = class.into();
        self
    }

    /// Set the whitespace-marker class token.
    pub fn with_space_class(mut self, class: impl Into<String>) -> Self {
        self.space_class = class.into();
        self
    }

    /// Restrict extraction to the given annotation names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable block normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check whether an annotation name passes the name filter.
    pub fn accepts(&self, name: &str) -> bool {
        match &self.names {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            shape: BlockShape::default(),
            comment_class: "comment".to_string(),
            space_class: "space".to_string(),
            names: None,
            normalize: true,
            parallel: true,
        }
    }
}
