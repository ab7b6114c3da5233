//! Line-level lexing
//!
//! Outline documents are line oriented, so lexing happens one physical line at a time:
//!
//!   - [`directives`] splits `#+` directive lines from content lines (the pre-pass)
//!   - [`tokens`] tokenizes the argument list of a TODO keyword declaration
//!   - [`line_classification`] assigns every content line its [`LineType`]

pub mod directives;
pub mod line_classification;
pub mod tokens;

pub use directives::{run_prepass, ContentLine, Directive, Prepass};
pub use line_classification::{classify_line, DateMatch, LineType};
