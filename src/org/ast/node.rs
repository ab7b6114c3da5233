//! Heading node, its key and its builder
//!
//! Nodes are produced once by the parser and are read-only afterwards: every field is
//! reachable through an accessor, and only the crate's own post-pass rewrites `headline`,
//! `todo` and `priority` before the node list is handed out.
//!
//! Equality between nodes compares content only. The [`NodeKey`] identifies a node inside
//! an index and takes no part in `==`.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tag marking a node as archived
pub const ARCHIVE_TAG: &str = "ARCHIVE";

/// Identifier of a node, unique within the process
///
/// A key pairs the generation of the [`KeyGenerator`] that issued it with the node's position
/// in that generator's output, so nodes from different parses never share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    generation: u64,
    index: u64,
}

impl NodeKey {
    /// Position of the node in the parse that produced it
    pub fn value(&self) -> u64 {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}.{}", self.generation, self.index)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index)
    }
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Monotonic key source scoped to a single parse call
///
/// Each generator takes a fresh generation number; the counter itself is local.
#[derive(Debug)]
pub struct KeyGenerator {
    generation: u64,
    next: u64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        KeyGenerator {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            next: 0,
        }
    }

    pub fn next_key(&mut self) -> NodeKey {
        let key = NodeKey {
            generation: self.generation,
            index: self.next,
        };
        self.next += 1;
        key
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading priority cookie (`[#A]`, `[#B]`, `[#C]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Priority {
    A,
    B,
    C,
}

impl Priority {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Priority::A),
            'B' => Some(Priority::B),
            'C' => Some(Priority::C),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Priority::A => 'A',
            Priority::B => 'B',
            Priority::C => 'C',
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One heading of an outline document together with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub(crate) key: NodeKey,
    pub(crate) level: usize,
    pub(crate) headline: String,
    pub(crate) body: String,
    pub(crate) first_tag: Option<String>,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) todo: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) properties: IndexMap<String, String>,
    pub(crate) drawers: IndexMap<String, String>,
    pub(crate) scheduled: Option<NaiveDate>,
    pub(crate) deadline: Option<NaiveDate>,
}

impl Node {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Number of leading `*` of the heading; 0 for the preamble node
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The first tag of the heading, in source order
    pub fn first_tag(&self) -> Option<&str> {
        self.first_tag.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn todo(&self) -> Option<&str> {
        self.todo.as_deref()
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn drawers(&self) -> &IndexMap<String, String> {
        &self.drawers
    }

    pub fn drawer(&self, name: &str) -> Option<&str> {
        self.drawers.get(name).map(String::as_str)
    }

    pub fn scheduled(&self) -> Option<NaiveDate> {
        self.scheduled
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn is_archived(&self) -> bool {
        self.has_tag(ARCHIVE_TAG)
    }

    /// Re-emit the node as outline text with the default tag column
    pub fn to_org_string(&self) -> String {
        crate::org::formats::org::OrgSerializer::default().serialize_node(self)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
            && self.headline == other.headline
            && self.body == other.body
            && self.first_tag == other.first_tag
            && self.tags == other.tags
            && self.todo == other.todo
            && self.priority == other.priority
            && self.properties == other.properties
            && self.drawers == other.drawers
            && self.scheduled == other.scheduled
            && self.deadline == other.deadline
    }
}

/// Accumulator for the node under construction
///
/// The parser owns exactly one builder at a time and converts it into a [`Node`] at each
/// heading boundary and at end of input. The `with_*` methods give tests and library users
/// a fluent way to assemble nodes by hand.
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    level: usize,
    headline: String,
    body: String,
    tags: Vec<String>,
    todo: Option<String>,
    priority: Option<Priority>,
    properties: IndexMap<String, String>,
    drawers: IndexMap<String, String>,
    scheduled: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
}

impl NodeBuilder {
    pub fn new(level: usize, headline: impl Into<String>) -> Self {
        NodeBuilder {
            level,
            headline: headline.into(),
            ..Default::default()
        }
    }

    /// Builder for the level-0 node holding text that precedes the first heading
    pub fn preamble() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn with_todo(mut self, todo: impl Into<String>) -> Self {
        self.todo = Some(todo.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_property(key, value);
        self
    }

    pub fn with_drawer(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert_drawer(name, content);
        self
    }

    pub fn with_scheduled(mut self, date: NaiveDate) -> Self {
        self.scheduled = Some(date);
        self
    }

    pub fn with_deadline(mut self, date: NaiveDate) -> Self {
        self.deadline = Some(date);
        self
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub(crate) fn push_body_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    pub(crate) fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Last write wins; the key keeps the position of its first insertion
    pub(crate) fn insert_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub(crate) fn insert_drawer(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.drawers.insert(name.into(), content.into());
    }

    pub(crate) fn set_scheduled(&mut self, date: NaiveDate) {
        self.scheduled = Some(date);
    }

    pub(crate) fn set_deadline(&mut self, date: NaiveDate) {
        self.deadline = Some(date);
    }

    /// Whether anything worth keeping has been accumulated
    pub fn has_content(&self) -> bool {
        self.level > 0
            || !self.headline.is_empty()
            || !self.body.trim().is_empty()
            || !self.tags.is_empty()
            || !self.properties.is_empty()
            || !self.drawers.is_empty()
            || self.scheduled.is_some()
            || self.deadline.is_some()
    }

    pub fn build(self, key: NodeKey) -> Node {
        Node {
            key,
            level: self.level,
            headline: self.headline,
            body: self.body,
            first_tag: self.tags.first().cloned(),
            tags: self.tags.into_iter().collect(),
            todo: self.todo,
            priority: self.priority,
            properties: self.properties,
            drawers: self.drawers,
            scheduled: self.scheduled,
            deadline: self.deadline,
        }
    }
}
