//! Serializing nodes and parsing the output again keeps their structure

use org_outline::org::ast::Node;
use org_outline::org::formats::OrgSerializer;
use org_outline::org::parsing::{parse_document, parse_nodes, OrgParser};
use org_outline::org::testing::Orgplore;
use rstest::rstest;

fn structure(nodes: &[Node]) -> Vec<(usize, String, Vec<String>, Vec<(String, String)>)> {
    nodes
        .iter()
        .map(|node| {
            (
                node.level(),
                node.headline().to_string(),
                node.tags().iter().cloned().collect(),
                node.properties()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        })
        .collect()
}

#[rstest]
#[case("* TODO Buy milk :home:\nSCHEDULED: <2024-01-01 Mon>\n")]
#[case("* Person\n:PROPERTIES:\n:AGE: 30\n:NAME: Ada Lovelace\n:END:\nbody\n")]
#[case("* A\n** B :x:y:\n*** C\n** D\n")]
#[case("* [#C] Low priority with a very long headline that runs past the tag column :t:\n")]
#[case("preamble\n\n* A\ntext\n\n")]
fn test_structure_survives(#[case] source: &str) {
    let first = parse_nodes(source).unwrap();
    let emitted = parse_document(source).unwrap().query().to_org_string();
    let second = parse_nodes(&emitted).unwrap();
    assert_eq!(structure(&first), structure(&second), "emitted:\n{emitted}");
}

#[rstest]
#[case("projects")]
#[case("drawers")]
fn test_samples_survive(#[case] name: &str) {
    let doc = Orgplore::sample(name).parse().unwrap();
    let emitted = OrgSerializer::default().serialize_view(&doc.query());
    // Directive lines are not emitted, so reuse the keywords the sample declared
    let reparsed = OrgParser::with_seeds(doc.keywords.clone())
        .parse(&emitted)
        .unwrap();
    assert_eq!(structure(&doc.nodes), structure(&reparsed.nodes));
}

#[test]
fn test_body_differs_at_most_by_trailing_newline() {
    let source = "* A\ntext\n\n* B\n";
    let nodes = parse_nodes(source).unwrap();
    let emitted = nodes[0].to_org_string();
    assert_eq!(emitted, "* A\ntext\n");
    let reparsed = parse_nodes(&emitted).unwrap();
    assert_eq!(reparsed[0].body(), "text\n");
    assert_eq!(nodes[0].body(), "text\n\n");
}
