//! Output format implementations for node views
//!
//! This module contains the serializers a view can be rendered with:
//! - org: outline text that parses back to the same nodes
//! - json / yaml: structured dumps of every node field
//! - treeviz: one line per node, nesting derived from the subtree index
//!
//! Every format implements [`Formatter`] and is looked up by name in a [`FormatRegistry`].

pub mod json;
pub mod org;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::{to_json_str, JsonFormatter, ViewSnapshot};
pub use org::{OrgFormatter, OrgSerializer, DEFAULT_TAG_COLUMN};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use yaml::{to_yaml_str, YamlFormatter};
