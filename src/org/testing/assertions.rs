//! Fluent assertion API for nodes

use crate::org::ast::{Node, Priority};
use crate::org::query::OrgQuery;
use chrono::NaiveDate;

// ============================================================================
// Entry Points
// ============================================================================

/// Create an assertion builder for a node list
pub fn assert_nodes(nodes: &[Node]) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes: nodes.iter().collect(),
    }
}

/// Create an assertion builder for the nodes of a view
pub fn assert_view(view: &OrgQuery) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes: view.iter().collect(),
    }
}

// ============================================================================
// Node List Assertions
// ============================================================================

pub struct NodesAssertion<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> NodesAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "Expected {} nodes, found {}: [{}]",
            expected,
            self.nodes.len(),
            summarize(&self.nodes)
        );
        self
    }

    /// Assert the headlines of every node, in order
    pub fn headlines(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.nodes.iter().map(|node| node.headline()).collect();
        assert_eq!(actual, expected, "Headline mismatch");
        self
    }

    /// Assert the levels of every node, in order
    pub fn levels(self, expected: &[usize]) -> Self {
        let actual: Vec<usize> = self.nodes.iter().map(|node| node.level()).collect();
        assert_eq!(actual, expected, "Level mismatch: [{}]", summarize(&self.nodes));
        self
    }

    /// Assert on a specific node by index
    pub fn node<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        assert!(
            index < self.nodes.len(),
            "Node index {} out of bounds (list has {} nodes)",
            index,
            self.nodes.len()
        );
        assertion(NodeAssertion {
            node: self.nodes[index],
            context: format!("nodes[{index}]"),
        });
        self
    }
}

// ============================================================================
// Single Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn level(self, expected: usize) -> Self {
        assert_eq!(
            self.node.level(),
            expected,
            "{}: expected level {}, found {}",
            self.context,
            expected,
            self.node.level()
        );
        self
    }

    pub fn headline(self, expected: &str) -> Self {
        assert_eq!(
            self.node.headline(),
            expected,
            "{}: headline mismatch",
            self.context
        );
        self
    }

    pub fn todo(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.node.todo(),
            expected,
            "{}: TODO keyword mismatch",
            self.context
        );
        self
    }

    pub fn priority(self, expected: Option<Priority>) -> Self {
        assert_eq!(
            self.node.priority(),
            expected,
            "{}: priority mismatch",
            self.context
        );
        self
    }

    /// Assert the full tag set; order of `expected` is irrelevant
    pub fn tags(self, expected: &[&str]) -> Self {
        let mut expected: Vec<&str> = expected.to_vec();
        expected.sort_unstable();
        expected.dedup();
        let actual: Vec<&str> = self.node.tags().iter().map(String::as_str).collect();
        assert_eq!(actual, expected, "{}: tag mismatch", self.context);
        self
    }

    pub fn first_tag(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.node.first_tag(),
            expected,
            "{}: first tag mismatch",
            self.context
        );
        self
    }

    pub fn property(self, key: &str, expected: &str) -> Self {
        assert_eq!(
            self.node.property(key),
            Some(expected),
            "{}: property {:?} mismatch (properties: {:?})",
            self.context,
            key,
            self.node.properties()
        );
        self
    }

    pub fn property_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.properties().len(),
            expected,
            "{}: property count mismatch",
            self.context
        );
        self
    }

    pub fn drawer(self, name: &str, expected: &str) -> Self {
        assert_eq!(
            self.node.drawer(name),
            Some(expected),
            "{}: drawer :{}: mismatch",
            self.context,
            name
        );
        self
    }

    pub fn body(self, expected: &str) -> Self {
        assert_eq!(self.node.body(), expected, "{}: body mismatch", self.context);
        self
    }

    pub fn body_excludes(self, fragment: &str) -> Self {
        assert!(
            !self.node.body().contains(fragment),
            "{}: body should not contain {:?}, found {:?}",
            self.context,
            fragment,
            self.node.body()
        );
        self
    }

    pub fn scheduled(self, expected: Option<NaiveDate>) -> Self {
        assert_eq!(
            self.node.scheduled(),
            expected,
            "{}: scheduled date mismatch",
            self.context
        );
        self
    }

    pub fn deadline(self, expected: Option<NaiveDate>) -> Self {
        assert_eq!(
            self.node.deadline(),
            expected,
            "{}: deadline mismatch",
            self.context
        );
        self
    }

    pub fn archived(self, expected: bool) -> Self {
        assert_eq!(
            self.node.is_archived(),
            expected,
            "{}: archived flag mismatch",
            self.context
        );
        self
    }
}

fn summarize(nodes: &[&Node]) -> String {
    nodes
        .iter()
        .map(|node| format!("{}:{}", node.level(), node.headline()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::parsing::parse_document;

    #[test]
    fn test_fluent_assertions() {
        let doc = parse_document("* TODO [#B] Task :b:a:\n:PROPERTIES:\n:ID: 7\n:END:\n").unwrap();
        assert_nodes(&doc.nodes).count(1).levels(&[1]).node(0, |node| {
            node.todo(Some("TODO"))
                .priority(Some(Priority::B))
                .headline("Task")
                .tags(&["a", "b"])
                .first_tag(Some("b"))
                .property("ID", "7")
                .property_count(1)
                .body("")
                .archived(false)
        });
    }

    #[test]
    #[should_panic(expected = "nodes[0]: headline mismatch")]
    fn test_mismatch_reports_context() {
        let doc = parse_document("* Real\n").unwrap();
        assert_nodes(&doc.nodes).node(0, |node| node.headline("Other"));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds() {
        let doc = parse_document("* Only\n").unwrap();
        assert_nodes(&doc.nodes).node(3, |node| node);
    }
}
