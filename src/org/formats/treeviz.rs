//! Treeviz formatter for node views
//!
//! One line per node, with nesting drawn from the view's subtree index rather than from any
//! stored parent links. Filtering a view therefore changes the drawn tree the same way it
//! changes subtree selection.
//!
//! Format:
//! <prefix><connector> <icon> <label> (truncated to 40 characters)
//!
//! Example:
//!
//! ⧉ Document (3 nodes)
//! ├─ § TODO Plan :work:
//! │ └─ § Step one
//! └─ § Later
//!
//! A level-0 preamble node spans every heading after it, so it is drawn as their root.
//!
//! Icons
//!     View: ⧉
//!     Heading: §
//!     Preamble: ¶

use super::registry::{FormatError, Formatter};
use crate::org::ast::Node;
use crate::org::query::OrgQuery;
use std::ops::Range;

const LABEL_WIDTH: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(view: &OrgQuery) -> String {
    let mut result = format!(
        "⧉ {} ({} {})\n",
        truncate(view.label().unwrap_or("Document"), LABEL_WIDTH),
        view.len(),
        if view.len() == 1 { "node" } else { "nodes" }
    );
    append_children(&mut result, view, 0..view.len(), "");
    result
}

fn append_children(result: &mut String, view: &OrgQuery, range: Range<usize>, prefix: &str) {
    let mut roots = Vec::new();
    let mut index = range.start;
    while index < range.end {
        roots.push(index);
        index = view
            .subtree_range(index)
            .map_or(range.end, |below| below.end.min(range.end));
    }
    for (i, &root) in roots.iter().enumerate() {
        append_node(result, view, root, prefix, i == roots.len() - 1);
    }
}

fn append_node(result: &mut String, view: &OrgQuery, index: usize, prefix: &str, is_last: bool) {
    let Some(node) = view.get(index) else {
        return;
    };
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(node),
        truncate(&display_label(node), LABEL_WIDTH)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    if let Some(below) = view.subtree_range(index) {
        append_children(result, view, below, &new_prefix);
    }
}

fn icon(node: &Node) -> &'static str {
    if node.level() == 0 {
        "¶"
    } else {
        "§"
    }
}

fn display_label(node: &Node) -> String {
    let mut parts = Vec::new();
    if let Some(todo) = node.todo() {
        parts.push(todo.to_string());
    }
    if let Some(priority) = node.priority() {
        parts.push(format!("[#{priority}]"));
    }
    if !node.headline().is_empty() {
        parts.push(node.headline().to_string());
    }
    if !node.tags().is_empty() {
        let tags: Vec<&str> = node.tags().iter().map(String::as_str).collect();
        parts.push(format!(":{}:", tags.join(":")));
    }
    if parts.is_empty() && node.level() == 0 {
        parts.push("preamble".to_string());
    }
    parts.join(" ")
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, view: &OrgQuery) -> Result<String, FormatError> {
        Ok(to_treeviz_str(view))
    }

    fn description(&self) -> &str {
        "Visual outline with one line per node"
    }
}
