//! TODO/priority post-pass
//!
//! Runs once over the complete node list. For each node the leading TODO keyword is moved
//! from the headline into `todo` (only for keywords the document recognizes), and then the
//! `[#A]`-style priority cookie is moved into `priority`. The priority is looked for on the
//! headline as it stands after the TODO keyword has been removed.

use crate::org::ast::{KeywordSet, Node, Priority};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TODO_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]+)(?:\s+(.*))?$").unwrap());
static PRIORITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[#([ABC])\](?:\s+(.*))?$").unwrap());

/// Split a recognized leading TODO keyword from the headline
pub fn extract_todo<'a>(headline: &'a str, keywords: &KeywordSet) -> Option<(&'a str, &'a str)> {
    let caps = TODO_REGEX.captures(headline)?;
    let keyword = caps.get(1)?.as_str();
    if !keywords.contains(keyword) {
        return None;
    }
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((keyword, rest))
}

/// Split a leading priority cookie from the headline
pub fn extract_priority(headline: &str) -> Option<(Priority, &str)> {
    let caps = PRIORITY_REGEX.captures(headline)?;
    let priority = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Priority::from_char)?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((priority, rest))
}

/// Rewrite one node's headline, setting `todo` and `priority`
pub fn apply_to_node(node: &mut Node, keywords: &KeywordSet) {
    let original = node.headline.clone();

    if let Some((keyword, rest)) = extract_todo(&node.headline, keywords) {
        let (keyword, rest) = (keyword.to_string(), rest.to_string());
        node.todo = Some(keyword);
        node.headline = rest;
    }
    if let Some((priority, rest)) = extract_priority(&node.headline) {
        let rest = rest.to_string();
        node.priority = Some(priority);
        node.headline = rest;
    }

    if original != node.headline {
        debug!(from = %original, to = %node.headline, "rewrote headline");
    }
}

/// Apply the post-pass to every node
pub fn apply_todo_and_priority(nodes: &mut [Node], keywords: &KeywordSet) {
    for node in nodes.iter_mut() {
        apply_to_node(node, keywords);
    }
}
