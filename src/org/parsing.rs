//! Parsing outline documents into node lists
//!
//! The entry points are [`parse_document`] (default TODO keywords) and [`OrgParser`] (keyword
//! seeds taken from [`ParserConfig`]). Both run the three-stage pipeline described in
//! [`transforms`](crate::org::transforms):
//!
//!   1. directive pre-pass ([`lexing::directives`](crate::org::lexing::directives))
//!   2. heading/body state machine ([`engine`]) with its drawer sub-parsers ([`drawers`])
//!   3. TODO/priority post-pass ([`keywords`])
//!
//! A parse either produces the complete [`Document`] or fails with a
//! [`ParseError`]; there is no partial result.

pub mod drawers;
pub mod engine;
pub mod keywords;

use crate::org::ast::{KeywordSet, Node};
use crate::org::config::ParserConfig;
use crate::org::error::ParseError;
use crate::org::query::OrgQuery;
use crate::org::transforms::{document_pipeline, STRING_TO_DOCUMENT};
use serde::Serialize;

/// A parsed outline document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Nodes in document order
    pub nodes: Vec<Node>,
    /// TODO keywords recognized while parsing (seeds plus declarations)
    pub keywords: KeywordSet,
    /// Names listed on `#+DRAWERS:` lines
    pub declared_drawers: Vec<String>,
    /// Directive lines that configure nothing known, in document order
    pub unknown_directives: Vec<String>,
}

impl Document {
    /// Build an indexed view over a copy of the nodes
    pub fn query(&self) -> OrgQuery {
        OrgQuery::from_nodes(self.nodes.iter().cloned())
    }

    /// Build an indexed view, consuming the document
    pub fn into_query(self) -> OrgQuery {
        OrgQuery::from_nodes(self.nodes)
    }
}

/// Parse a document with the default `TODO`/`DONE` keywords
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    STRING_TO_DOCUMENT.run(source.to_string())
}

/// Parse a document and return only its nodes
pub fn parse_nodes(source: &str) -> Result<Vec<Node>, ParseError> {
    parse_document(source).map(|doc| doc.nodes)
}

/// Parser configured with its own TODO keyword seeds
#[derive(Debug, Clone)]
pub struct OrgParser {
    seeds: KeywordSet,
}

impl OrgParser {
    pub fn new() -> Self {
        OrgParser {
            seeds: KeywordSet::new(),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        OrgParser {
            seeds: KeywordSet::from_seeds(config.todo_keywords.iter().cloned()),
        }
    }

    /// Parser seeded with an explicit keyword set, e.g. the keywords of an earlier parse
    pub fn with_seeds(seeds: KeywordSet) -> Self {
        OrgParser { seeds }
    }

    pub fn seeds(&self) -> &KeywordSet {
        &self.seeds
    }

    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        document_pipeline(self.seeds.clone()).run(source.to_string())
    }
}

impl Default for OrgParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_buy_milk() {
        let doc = parse_document("* TODO Buy milk :home:\nSCHEDULED: <2024-01-01 Mon>\n").unwrap();
        assert_eq!(doc.nodes.len(), 1);
        let node = &doc.nodes[0];
        assert_eq!(node.todo(), Some("TODO"));
        assert_eq!(node.headline(), "Buy milk");
        assert_eq!(node.tags().iter().collect::<Vec<_>>(), vec!["home"]);
        assert_eq!(node.scheduled(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_configured_seeds_replace_defaults() {
        let parser = OrgParser::from_config(&ParserConfig {
            todo_keywords: vec!["OPEN".to_string(), "CLOSED".to_string()],
        });
        let doc = parser.parse("* OPEN ticket\n* TODO not a keyword here\n").unwrap();
        assert_eq!(doc.nodes[0].todo(), Some("OPEN"));
        assert_eq!(doc.nodes[1].todo(), None);
        assert_eq!(doc.nodes[1].headline(), "TODO not a keyword here");
    }

    #[test]
    fn test_unknown_directives_are_kept() {
        let doc = parse_document("#+TITLE: My notes\n#+DRAWERS: NOTES\n* A\n").unwrap();
        assert_eq!(doc.unknown_directives, vec!["#+TITLE: My notes"]);
        assert_eq!(doc.declared_drawers, vec!["NOTES"]);
    }

    #[test]
    fn test_parse_failure_has_no_partial_result() {
        let result = parse_nodes("* A\nok\n* B\n:NOTES:\nnever closed\n");
        assert_eq!(
            result,
            Err(ParseError::UnterminatedDrawer {
                name: "NOTES".to_string(),
                line: 4
            })
        );
    }
}
