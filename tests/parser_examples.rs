//! Parser behavior on small documents and on the curated samples
//!
//! - Use Orgplore to load the sample documents
//! - Use assert_nodes for node shape verification

use chrono::NaiveDate;
use org_outline::org::ast::Priority;
use org_outline::org::error::{ConstructionError, OrgError, ParseError};
use org_outline::org::parsing::{parse_document, parse_nodes, OrgParser};
use org_outline::org::query::OrgQuery;
use org_outline::org::testing::{assert_nodes, assert_view, Orgplore};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn test_scheduled_todo_with_tag() {
    let nodes = parse_nodes("* TODO Buy milk :home:\nSCHEDULED: <2024-01-01 Mon>\n").unwrap();
    assert_nodes(&nodes).count(1).node(0, |node| {
        node.level(1)
            .todo(Some("TODO"))
            .headline("Buy milk")
            .tags(&["home"])
            .scheduled(date(2024, 1, 1))
            .deadline(None)
            .body("")
    });
}

#[test]
fn test_property_block_is_not_body() {
    let nodes = parse_nodes("* Person\n:PROPERTIES:\n:AGE: 30\n:END:\nLikes tea.\n").unwrap();
    assert_nodes(&nodes).count(1).node(0, |node| {
        node.property("AGE", "30")
            .property_count(1)
            .body("Likes tea.\n")
            .body_excludes(":PROPERTIES:")
            .body_excludes(":END:")
    });
}

#[test]
fn test_unclosed_drawer_fails() {
    let result = parse_nodes("* A\n:LOGBOOK:\n- note\n");
    assert_eq!(
        result,
        Err(ParseError::UnterminatedDrawer {
            name: "LOGBOOK".to_string(),
            line: 2
        })
    );
}

#[test]
fn test_two_level_subtree() {
    let view = parse_document("* A\n** B\n").unwrap().into_query();
    let a = view.get(0).unwrap();
    let b = view.get(1).unwrap();
    assert_view(&view.select_subtree(a).unwrap()).headlines(&["B"]);
    assert_view(&view.select_subtree(b).unwrap()).count(0);
}

#[test]
fn test_subtree_across_separate_parses() {
    let first = parse_document("* A\n** A-child\n").unwrap().into_query();
    let stranger = parse_nodes("* Z\n").unwrap();
    assert_eq!(
        first.select_subtree(&stranger[0]).unwrap_err(),
        ConstructionError::AnchorNotIndexed {
            key: stranger[0].key()
        }
    );

    let second = parse_document("* B\n** B1\n").unwrap().into_query();
    let merged = OrgQuery::new(
        first
            .nodes()
            .iter()
            .chain(second.nodes())
            .cloned()
            .collect(),
    );
    let b = second.first().unwrap();
    let under_b = merged.select_subtree(b).unwrap();
    assert_view(&under_b).headlines(&["B1"]);
    assert_eq!(under_b.label(), Some("B"));
}

#[test]
fn test_priority_after_todo() {
    let nodes = parse_nodes("* [#A] Ship it\n* DONE [#B] Shipped\n* [#B] TODO Not a keyword\n")
        .unwrap();
    assert_nodes(&nodes)
        .count(3)
        .node(0, |node| node.priority(Some(Priority::A)).headline("Ship it"))
        .node(1, |node| {
            node.todo(Some("DONE"))
                .priority(Some(Priority::B))
                .headline("Shipped")
        })
        .node(2, |node| {
            node.todo(None)
                .priority(Some(Priority::B))
                .headline("TODO Not a keyword")
        });
}

#[test]
fn test_unknown_caps_word_is_left_alone() {
    let nodes = parse_nodes("* URGENT call back\n").unwrap();
    assert_nodes(&nodes).node(0, |node| node.todo(None).headline("URGENT call back"));
}

#[test]
fn test_declared_keywords_extend_the_set() {
    let source = "#+SEQ_TODO: NEXT(n) WAITING | DONE\n* WAITING reply\n* NEXT step\n* TODO still works\n";
    let doc = parse_document(source).unwrap();
    assert!(doc.keywords.contains("WAITING"));
    assert_nodes(&doc.nodes)
        .node(0, |node| node.todo(Some("WAITING")).headline("reply"))
        .node(1, |node| node.todo(Some("NEXT")).headline("step"))
        .node(2, |node| node.todo(Some("TODO")));
}

#[test]
fn test_preamble_and_levels() {
    let nodes = parse_nodes("Intro text\n* One\n*** Three\n** Two\n").unwrap();
    assert_nodes(&nodes)
        .levels(&[0, 1, 3, 2])
        .node(0, |node| node.headline("").body("Intro text\n"));
}

#[test]
fn test_document_without_headings() {
    let nodes = parse_nodes("just some text\nand more\n").unwrap();
    assert_nodes(&nodes)
        .count(1)
        .node(0, |node| node.level(0).body("just some text\nand more\n"));

    let empty = parse_nodes("").unwrap();
    assert_nodes(&empty).count(1).node(0, |node| node.level(0).body(""));
}

#[test]
fn test_clock_and_comment_lines_are_dropped() {
    let source = "* Work\nCLOCK: [2024-01-01 Mon 09:00]--[2024-01-01 Mon 10:00] =>  1:00\n# private\nDid things.\n";
    let nodes = parse_nodes(source).unwrap();
    assert_nodes(&nodes).node(0, |node| node.body("Did things.\n"));
}

#[test]
fn test_malformed_property_line() {
    let result = parse_nodes("* A\n:PROPERTIES:\n:OK: yes\nnot a property\n:END:\n");
    assert_eq!(
        result,
        Err(ParseError::MalformedProperty {
            line: 4,
            text: "not a property".to_string()
        })
    );
}

#[test]
fn test_unterminated_property_block() {
    let result = parse_nodes("* A\n:PROPERTIES:\n:OK: yes\n");
    assert_eq!(
        result,
        Err(ParseError::UnterminatedDrawer {
            name: "PROPERTIES".to_string(),
            line: 2
        })
    );
}

#[test]
fn test_directive_lines_keep_source_line_numbers() {
    let result = parse_nodes("#+TITLE: x\n#+DRAWERS: NOTES\n* A\n:NOTES:\n");
    assert!(matches!(
        result,
        Err(ParseError::UnterminatedDrawer { line: 4, .. })
    ));
}

#[test]
fn test_custom_parser_seeds() {
    let parser = OrgParser::default();
    assert!(parser.seeds().contains("TODO"));
    let doc = parser.parse("* DONE finished\n").unwrap();
    assert_nodes(&doc.nodes).node(0, |node| node.todo(Some("DONE")).headline("finished"));
}

#[test]
fn test_projects_sample() {
    let doc = Orgplore::sample("projects").parse().unwrap();
    assert_eq!(doc.unknown_directives, vec!["#+TITLE: Projects"]);
    for keyword in ["TODO", "DONE", "NEXT", "WAITING", "CANCELLED"] {
        assert!(doc.keywords.contains(keyword), "missing {keyword}");
    }

    assert_nodes(&doc.nodes)
        .count(9)
        .levels(&[0, 1, 2, 2, 2, 1, 2, 2, 1])
        .headlines(&[
            "",
            "Work",
            "Ship the release",
            "Review pull requests",
            "Old migration",
            "Home",
            "Plumber visit",
            "Paint the fence",
            "Someday",
        ])
        .node(0, |node| node.body("Notes about ongoing projects.\n\n"))
        .node(1, |node| node.tags(&["work"]).body(""))
        .node(2, |node| {
            node.todo(Some("TODO"))
                .priority(Some(Priority::A))
                .tags(&["release"])
                .deadline(date(2024, 3, 1))
                .property("OWNER", "dana")
                .property("EFFORT", "3d")
                .body("Cut the branch and tag it.\n")
        })
        .node(3, |node| node.todo(Some("NEXT")).body("Look at the open queue.\n"))
        .node(4, |node| node.todo(Some("DONE")).archived(true))
        .node(5, |node| node.tags(&["home"]).body(""))
        .node(6, |node| {
            node.todo(Some("WAITING"))
                .scheduled(date(2024, 2, 12))
                .drawer("LOGBOOK", "- State \"WAITING\" from \"TODO\"\n")
                .body("")
        })
        .node(7, |node| node.todo(None).priority(Some(Priority::C)))
        .node(8, |node| node.level(1).tags(&[]));
}

#[test]
fn test_drawers_sample() {
    let doc = Orgplore::sample("drawers").parse().unwrap();
    assert_nodes(&doc.nodes)
        .count(2)
        .node(0, |node| {
            node.headline("Reading list")
                .property("CATEGORY", "novels")
                .property("AUTHOR", "Le Guin")
                .property_count(2)
                .drawer("NOTES", "The Dispossessed\nThe Left Hand of Darkness\n")
                .body("Body after drawers.\n")
        })
        .node(1, |node| node.headline("Empty properties").property_count(0));

    let keys: Vec<&str> = doc.nodes[0].properties().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["CATEGORY", "AUTHOR"]);
}

#[test]
fn test_broken_sample() {
    let result = Orgplore::sample("broken-unterminated").parse();
    match result {
        Err(OrgError::Parse(ParseError::UnterminatedDrawer { name, line })) => {
            assert_eq!(name, "LOGBOOK");
            assert_eq!(line, 4);
        }
        other => panic!("expected unterminated drawer, got {other:?}"),
    }
}
