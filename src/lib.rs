//! # org-outline
//!
//! A parser for org-style outline documents and a query layer over the parsed headings.
//!
//! Parsing turns text into a flat, ordered list of [`Node`](org::ast::Node)s. The tree is
//! never stored: an [`OrgQuery`](org::query::OrgQuery) derives each node's subtree from the
//! levels of the nodes that follow it, and every filter or sort returns a freshly indexed view.
//!
//! ```rust,ignore
//! use org_outline::org::parsing::parse_document;
//!
//! let view = parse_document("* A :work:\n** B\n* C\n")?.into_query();
//! let under_a = view.select_subtree(view.first().unwrap())?;
//! assert_eq!(under_a.len(), 1);
//! ```
//!
//! ## Testing
//!
//! For testing guidelines, see the [testing module](org::testing).

pub mod org;
