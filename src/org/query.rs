//! Indexed views over node sequences
//!
//! An [`OrgQuery`] wraps an ordered node sequence and knows, for every node in it, which
//! nodes form its subtree: the maximal contiguous run of nodes right after it whose level is
//! strictly greater than its own. Nothing in the node list points at parents or children;
//! the structure is derived from levels alone, so it is recomputed for every view and holds
//! for any sub-sequence, including views produced by filtering or sorting.
//!
//! The subtree spans are computed at construction in a single pass with a stack of open
//! levels: a node's span ends at the first later node whose level is less than or equal to
//! its own. Selecting a subtree wraps that span in a fresh view, which indexes itself the
//! same way, so the rule holds recursively.
//!
//! Views are immutable. Every operation that filters, sorts or rejects returns a new view and
//! leaves the receiver untouched. Nodes are shared between views through [`Arc`].
//!
//! # Example
//!
//! ```rust,ignore
//! let view = parse_document(source)?.into_query();
//! let work = view.select_tag("work").reject_archived();
//! let first = view.first().unwrap();
//! let children = view.select_subtree(first)?;
//! print!("{}", children.to_org_string());
//! ```

use crate::org::ast::{Node, NodeKey, ARCHIVE_TAG};
use crate::org::error::ConstructionError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;
use std::sync::Arc;

/// Anchor for [`OrgQuery::select_subtree`]
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// The whole wrapped sequence
    All,
    /// The subtree below a node
    Node(&'a Node),
    /// The subtree below the single node of a view (an empty view selects everything)
    View(&'a OrgQuery),
}

impl<'a> From<&'a Node> for Selection<'a> {
    fn from(node: &'a Node) -> Self {
        Selection::Node(node)
    }
}

impl<'a> From<&'a OrgQuery> for Selection<'a> {
    fn from(view: &'a OrgQuery) -> Self {
        Selection::View(view)
    }
}

/// Immutable view over an ordered node sequence with its subtree index
#[derive(Debug, Clone)]
pub struct OrgQuery {
    nodes: Vec<Arc<Node>>,
    label: Option<String>,
    file_tags: BTreeSet<String>,
    positions: HashMap<NodeKey, usize>,
    subtree_ends: Vec<usize>,
}

impl OrgQuery {
    pub fn new(nodes: Vec<Arc<Node>>) -> Self {
        Self::build(nodes, None)
    }

    /// A view titled after the node it descends from
    pub fn with_label(nodes: Vec<Arc<Node>>, label: impl Into<String>) -> Self {
        Self::build(nodes, Some(label.into()))
    }

    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        Self::new(nodes.into_iter().map(Arc::new).collect())
    }

    fn build(nodes: Vec<Arc<Node>>, label: Option<String>) -> Self {
        let file_tags = nodes
            .iter()
            .flat_map(|node| node.tags().iter().cloned())
            .collect();

        let mut positions = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            // A node repeated in the sequence is indexed at its first occurrence
            positions.entry(node.key()).or_insert(index);
        }

        OrgQuery {
            subtree_ends: subtree_ends(&nodes),
            nodes,
            label,
            file_tags,
            positions,
        }
    }

    /// Title of the view, set on subtree views to the anchor's headline
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Union of the tags of every wrapped node
    pub fn file_tags(&self) -> &BTreeSet<String> {
        &self.file_tags
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the view wraps exactly one node
    pub fn is_mono_node(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().map(|node| &**node)
    }

    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index).map(|node| &**node)
    }

    /// Copy the wrapped nodes out of the view
    pub fn to_vec(&self) -> Vec<Node> {
        self.iter().cloned().collect()
    }

    pub fn first(&self) -> Option<&Node> {
        self.get(0)
    }

    /// A uniformly chosen node, or `None` on an empty view
    pub fn random(&self) -> Option<&Node> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Node> {
        self.nodes.choose(rng).map(|node| &**node)
    }

    /// The subtree view of a node of this view, or `None` if the node is not indexed here
    pub fn subtree_of(&self, node: &Node) -> Option<OrgQuery> {
        let start = *self.positions.get(&node.key())?;
        let range = self.subtree_range(start)?;
        Some(OrgQuery::with_label(
            self.nodes[range].to_vec(),
            self.nodes[start].headline(),
        ))
    }

    /// Index range of the nodes forming the subtree of the node at `index`
    pub fn subtree_range(&self, index: usize) -> Option<Range<usize>> {
        let end = *self.subtree_ends.get(index)?;
        Some(index + 1..end)
    }

    /// Select the subtree under an anchor
    ///
    /// A node anchor yields its subtree view, and so does a view of exactly one node. An
    /// empty view or [`Selection::All`] yields a view over the whole sequence. A view of
    /// several nodes, or a node this view does not index, is an error.
    pub fn select_subtree<'a>(
        &self,
        selection: impl Into<Selection<'a>>,
    ) -> Result<OrgQuery, ConstructionError> {
        let node = match selection.into() {
            Selection::All => return Ok(self.clone()),
            Selection::Node(node) => node,
            Selection::View(view) => match view.len() {
                0 => return Ok(self.clone()),
                1 => &*view.nodes[0],
                count => return Err(ConstructionError::MultipleAnchors { count }),
            },
        };
        self.subtree_of(node)
            .ok_or(ConstructionError::AnchorNotIndexed { key: node.key() })
    }

    /// Nodes carrying `tag`, in order
    pub fn select_tag(&self, tag: &str) -> OrgQuery {
        self.select(|node| node.has_tag(tag))
    }

    /// Nodes matching `predicate`, in order
    pub fn select<F>(&self, mut predicate: F) -> OrgQuery
    where
        F: FnMut(&Node) -> bool,
    {
        OrgQuery::new(
            self.nodes
                .iter()
                .filter(|node| predicate(node))
                .cloned()
                .collect(),
        )
    }

    /// Nodes not matching `rejector`, in order
    pub fn reject<F>(&self, mut rejector: F) -> OrgQuery
    where
        F: FnMut(&Node) -> bool,
    {
        self.select(|node| !rejector(node))
    }

    pub fn reject_tag(&self, tag: &str) -> OrgQuery {
        self.reject(|node| node.has_tag(tag))
    }

    pub fn reject_archived(&self) -> OrgQuery {
        self.reject_tag(ARCHIVE_TAG)
    }

    /// Stable sort by a key
    pub fn sort_by_key<K, F>(&self, mut key: F) -> OrgQuery
    where
        K: Ord,
        F: FnMut(&Node) -> K,
    {
        let mut nodes = self.nodes.clone();
        nodes.sort_by_key(|node| key(node));
        OrgQuery::new(nodes)
    }

    /// Stable sort by a comparator
    pub fn sort_by<F>(&self, mut compare: F) -> OrgQuery
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        let mut nodes = self.nodes.clone();
        nodes.sort_by(|a, b| compare(a, b));
        OrgQuery::new(nodes)
    }

    /// Concatenated outline text of every wrapped node
    pub fn to_org_string(&self) -> String {
        crate::org::formats::org::OrgSerializer::default().serialize_view(self)
    }
}

impl<'a> IntoIterator for &'a OrgQuery {
    type Item = &'a Node;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Arc<Node>>, fn(&'a Arc<Node>) -> &'a Node>;

    fn into_iter(self) -> Self::IntoIter {
        let as_node: fn(&'a Arc<Node>) -> &'a Node = |node| &**node;
        self.nodes.iter().map(as_node)
    }
}

impl FromIterator<Node> for OrgQuery {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        OrgQuery::from_nodes(iter)
    }
}

impl From<Vec<Node>> for OrgQuery {
    fn from(nodes: Vec<Node>) -> Self {
        OrgQuery::from_nodes(nodes)
    }
}

/// Exclusive end index of every node's subtree span
fn subtree_ends(nodes: &[Arc<Node>]) -> Vec<usize> {
    let mut ends = vec![nodes.len(); nodes.len()];
    // Indices of nodes whose span is still open; levels strictly increase bottom to top
    let mut open: Vec<usize> = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        while let Some(&top) = open.last() {
            if nodes[top].level() < node.level() {
                break;
            }
            ends[top] = index;
            open.pop();
        }
        open.push(index);
    }
    ends
}
