//! Testing utilities for node assertions and sample documents
//!
//! # Parser Testing Guidelines
//!
//! 1. **[Orgplore](samples::Orgplore)** loads the vetted documents under `docs/samples/`.
//!    Prefer them over ad-hoc strings when a test exercises more than a line or two.
//! 2. **[assert_nodes]** checks the shape of a node list or view with a fluent API, instead
//!    of indexing into vectors and comparing fields one by one.
//!
//! ```rust,ignore
//! use org_outline::org::testing::{assert_nodes, Orgplore};
//!
//! let doc = Orgplore::sample("projects").parse().unwrap();
//! assert_nodes(&doc.nodes)
//!     .count(6)
//!     .node(1, |node| {
//!         node.level(1)
//!             .todo(Some("TODO"))
//!             .headline("Ship the release")
//!             .tags(&["work"])
//!     });
//! ```

mod assertions;
pub mod samples;

pub use assertions::{assert_nodes, assert_view, NodeAssertion, NodesAssertion};
pub use samples::Orgplore;
