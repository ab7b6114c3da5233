//! Error types for parsing, indexing and loading
//!
//! Two failure domains exist in the core. [`ParseError`] means the source document is
//! malformed and is reported with the 1-based line number in the original text.
//! [`ConstructionError`] means a query was called with an argument it cannot index, which is
//! a usage error at the call site. Both abort the operation; there are no partial results.
//!
//! [`OrgError`] is the umbrella used by the loader and the CLI, where I/O and configuration
//! failures join the two core kinds.

use crate::org::ast::NodeKey;
use thiserror::Error;

/// Malformed input document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line inside a `:PROPERTIES:` block is neither `:KEY: VALUE` nor `:END:`
    #[error("line {line}: no property inside a property drawer: {text:?}")]
    MalformedProperty { line: usize, text: String },
    /// A drawer (or property block) was opened and input ended before `:END:`
    #[error("line {line}: drawer :{name}: found but :END: missed")]
    UnterminatedDrawer { name: String, line: usize },
}

impl ParseError {
    /// The 1-based source line the error points at
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedProperty { line, .. } => *line,
            ParseError::UnterminatedDrawer { line, .. } => *line,
        }
    }
}

/// Invalid arguments to a view operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Subtree selection is only defined for a single anchor node
    #[error("subtree selection needs a single anchor, got a view of {count} nodes")]
    MultipleAnchors { count: usize },
    /// The anchor node is not part of the view being queried
    #[error("node {key} is not indexed by this view")]
    AnchorNotIndexed { key: NodeKey },
}

/// Any failure surfaced by the loader or the command line
#[derive(Debug, Error)]
pub enum OrgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Format error: {0}")]
    Format(#[from] crate::org::formats::FormatError),
}
