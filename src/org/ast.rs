//! Node model for parsed outline documents
//!
//! A parsed document is a flat, ordered list of [`Node`]s, one per heading (plus an optional
//! level-0 preamble node). The tree is implicit in the levels; see
//! [`OrgQuery`](crate::org::query::OrgQuery) for the structural index built over it.

pub mod keywords;
pub mod node;

pub use keywords::{KeywordSet, DEFAULT_TODO_KEYWORDS};
pub use node::{KeyGenerator, Node, NodeBuilder, NodeKey, Priority, ARCHIVE_TAG};
