//! Format registry for view serialization
//!
//! Formats are registered by name and picked at runtime, which is how the command line
//! resolves its `--format` argument.

use crate::org::config::FormatConfig;
use crate::org::query::OrgQuery;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Serializer of a node view into one textual representation
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "org", "treeviz")
    fn name(&self) -> &str;

    fn serialize(&self, view: &OrgQuery) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of view formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter of the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a view using the named format
    pub fn serialize(&self, view: &OrgQuery, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(view)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the built-in formats and the default tag column
    pub fn with_defaults() -> Self {
        Self::with_org_formatter(super::OrgFormatter::default())
    }

    /// Registry with the built-in formats, the org format honoring `config.tag_column`
    pub fn from_config(config: &FormatConfig) -> Self {
        Self::with_org_formatter(super::OrgFormatter::from_config(config))
    }

    fn with_org_formatter(org: super::OrgFormatter) -> Self {
        let mut registry = Self::new();
        registry.register(org);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TreevizFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
