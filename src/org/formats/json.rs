//! JSON dump of a view

use super::registry::{FormatError, Formatter};
use crate::org::ast::Node;
use crate::org::query::OrgQuery;
use serde::Serialize;
use std::collections::BTreeSet;

/// Serializable snapshot of a view, shared by the structured formats
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    pub file_tags: &'a BTreeSet<String>,
    pub nodes: Vec<&'a Node>,
}

impl<'a> From<&'a OrgQuery> for ViewSnapshot<'a> {
    fn from(view: &'a OrgQuery) -> Self {
        ViewSnapshot {
            label: view.label(),
            file_tags: view.file_tags(),
            nodes: view.iter().collect(),
        }
    }
}

pub fn to_json_str(view: &OrgQuery) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&ViewSnapshot::from(view))
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, view: &OrgQuery) -> Result<String, FormatError> {
        to_json_str(view)
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON of every node field"
    }
}
