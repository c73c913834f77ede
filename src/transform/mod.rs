//! Tree transforms: block normalization and annotation extraction.
//!
//! Normalization runs first so extraction can rely on the
//! `block → code → line*` shape; extraction then walks every line,
//! pulls `[!name value]` markers out of recognized comment tokens and
//! deletes what they leave behind.

mod collapse;
mod extract;
mod normalize;
pub mod stream;
mod strip;

pub use collapse::wraps_expression;
pub use extract::{extract, Extraction, ExtractionStats, Extractor};
pub use normalize::{is_canonical, normalize};
pub use stream::{CharStream, Match, Scanner};
pub use strip::{collapse_spaces, strip, StripOutcome};
