//! YAML dump of a view

use super::json::ViewSnapshot;
use super::registry::{FormatError, Formatter};
use crate::org::query::OrgQuery;

pub fn to_yaml_str(view: &OrgQuery) -> Result<String, FormatError> {
    serde_yaml::to_string(&ViewSnapshot::from(view))
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, view: &OrgQuery) -> Result<String, FormatError> {
        to_yaml_str(view)
    }
}
