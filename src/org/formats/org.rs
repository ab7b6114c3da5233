//! Outline text serializer
//!
//! Emits nodes back as org text. The heading line is the level's stars, the TODO keyword,
//! the priority cookie and the headline; tags are right-aligned by padding the line with
//! spaces up to the tag column. Planning, the property block and drawers follow the heading,
//! then the body. Parsing the output yields nodes with the same level, headline, tags and
//! properties.

use super::registry::{FormatError, Formatter};
use crate::org::ast::Node;
use crate::org::config::FormatConfig;
use crate::org::parsing::drawers::PROPERTIES_DRAWER;
use crate::org::query::OrgQuery;

/// Width the heading line is padded to before its tags
pub const DEFAULT_TAG_COLUMN: usize = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgSerializer {
    tag_column: usize,
}

impl OrgSerializer {
    pub fn new(tag_column: usize) -> Self {
        OrgSerializer { tag_column }
    }

    pub fn from_config(config: &FormatConfig) -> Self {
        Self::new(config.tag_column)
    }

    pub fn tag_column(&self) -> usize {
        self.tag_column
    }

    pub fn serialize_node(&self, node: &Node) -> String {
        let mut out = String::new();
        if has_heading_line(node) {
            out.push_str(&self.heading_line(node));
            out.push('\n');
        }
        push_planning(&mut out, node);
        if !node.properties().is_empty() {
            out.push(':');
            out.push_str(PROPERTIES_DRAWER);
            out.push_str(":\n");
            for (key, value) in node.properties() {
                out.push_str(&format!(":{key}:{value}\n"));
            }
            out.push_str(":END:\n");
        }
        for (name, content) in node.drawers() {
            out.push_str(&format!(":{name}:\n{content}:END:\n"));
        }
        out.push_str(node.body());
        if out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    pub fn serialize_view(&self, view: &OrgQuery) -> String {
        view.iter().map(|node| self.serialize_node(node)).collect()
    }

    fn heading_line(&self, node: &Node) -> String {
        let mut line = "*".repeat(node.level());
        if let Some(todo) = node.todo() {
            line.push(' ');
            line.push_str(todo);
        }
        line.push(' ');
        if let Some(priority) = node.priority() {
            line.push_str(&format!("[#{priority}] "));
        }
        line.push_str(node.headline());

        if !node.tags().is_empty() {
            let width = line.chars().count();
            if width < self.tag_column {
                line.push_str(&" ".repeat(self.tag_column - width));
            } else {
                line.push(' ');
            }
            line.push(':');
            for tag in ordered_tags(node) {
                line.push_str(tag);
                line.push(':');
            }
        }
        line
    }
}

impl Default for OrgSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_COLUMN)
    }
}

/// The preamble node carries no heading of its own
fn has_heading_line(node: &Node) -> bool {
    node.level() > 0
        || !node.headline().is_empty()
        || node.todo().is_some()
        || node.priority().is_some()
        || !node.tags().is_empty()
}

/// First tag in source position, the rest sorted
fn ordered_tags(node: &Node) -> impl Iterator<Item = &str> {
    let first = node.first_tag();
    first.into_iter().chain(
        node.tags()
            .iter()
            .map(String::as_str)
            .filter(move |tag| Some(*tag) != first),
    )
}

fn push_planning(out: &mut String, node: &Node) {
    let mut stamps = Vec::new();
    if let Some(date) = node.scheduled() {
        stamps.push(format!("SCHEDULED: <{}>", date.format("%Y-%m-%d %a")));
    }
    if let Some(date) = node.deadline() {
        stamps.push(format!("DEADLINE: <{}>", date.format("%Y-%m-%d %a")));
    }
    if !stamps.is_empty() {
        out.push_str(&stamps.join(" "));
        out.push('\n');
    }
}

/// Registry adapter for [`OrgSerializer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgFormatter {
    serializer: OrgSerializer,
}

impl OrgFormatter {
    pub fn from_config(config: &FormatConfig) -> Self {
        OrgFormatter {
            serializer: OrgSerializer::from_config(config),
        }
    }
}

impl Formatter for OrgFormatter {
    fn name(&self) -> &str {
        "org"
    }

    fn serialize(&self, view: &OrgQuery) -> Result<String, FormatError> {
        Ok(self.serializer.serialize_view(view))
    }

    fn description(&self) -> &str {
        "Outline text with right-aligned tags"
    }
}
