//! Directive pre-pass
//!
//! Splits the raw document into `#+` directive lines and content lines before any heading is
//! looked at. Directives configure the parse of the whole document regardless of where they
//! appear, so a `#+SEQ_TODO:` line at the bottom still applies to headings above it.
//!
//! Recognized directives:
//!
//!   - `#+SEQ_TODO:` (also `#+TODO:` and `#+TYP_TODO:`) declares extra TODO keywords
//!   - `#+DRAWERS:` declares drawer names; recorded but never enforced
//!
//! Every other directive is kept as unknown. The pre-pass never fails.

use crate::org::ast::KeywordSet;
use crate::org::lexing::tokens::declared_keywords;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\+").unwrap());
static TODO_DECLARATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\+(?:SEQ_TODO|TYP_TODO|TODO):\s*(.*)$").unwrap());
static DRAWERS_DECLARATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\+DRAWERS:\s*(.*)$").unwrap());

/// A non-directive line with its 1-based position in the original document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub number: usize,
    pub text: String,
}

impl ContentLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        ContentLine {
            number,
            text: text.into(),
        }
    }
}

/// A classified directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    TodoKeywords(Vec<String>),
    Drawers(Vec<String>),
    Unknown(String),
}

/// Classify a line as a directive, or `None` when it is content
pub fn classify_directive(line: &str) -> Option<Directive> {
    if !DIRECTIVE_REGEX.is_match(line) {
        return None;
    }
    if let Some(caps) = TODO_DECLARATION_REGEX.captures(line) {
        return Some(Directive::TodoKeywords(declared_keywords(&caps[1])));
    }
    if let Some(caps) = DRAWERS_DECLARATION_REGEX.captures(line) {
        let names = caps[1].split_whitespace().map(str::to_string).collect();
        return Some(Directive::Drawers(names));
    }
    Some(Directive::Unknown(line.to_string()))
}

/// Output of the pre-pass
#[derive(Debug, Clone, PartialEq)]
pub struct Prepass {
    pub lines: Vec<ContentLine>,
    pub keywords: KeywordSet,
    pub declared_drawers: Vec<String>,
    pub unknown_directives: Vec<String>,
}

/// Run the pre-pass over `source`, extending `keywords` with every declared TODO keyword
pub fn run_prepass(source: &str, keywords: KeywordSet) -> Prepass {
    let mut prepass = Prepass {
        lines: Vec::new(),
        keywords,
        declared_drawers: Vec::new(),
        unknown_directives: Vec::new(),
    };

    for (index, line) in source.lines().enumerate() {
        match classify_directive(line) {
            None => prepass.lines.push(ContentLine::new(index + 1, line)),
            Some(Directive::TodoKeywords(declared)) => {
                debug!(line = index + 1, keywords = ?declared, "found TODO keyword declaration");
                for keyword in declared {
                    prepass.keywords.insert(keyword);
                }
            }
            Some(Directive::Drawers(names)) => prepass.declared_drawers.extend(names),
            Some(Directive::Unknown(text)) => prepass.unknown_directives.push(text),
        }
    }

    prepass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_keep_original_numbers() {
        let prepass = run_prepass("#+TITLE: Notes\n* A\n#+STARTUP: fold\nbody\n", KeywordSet::new());
        assert_eq!(
            prepass.lines,
            vec![ContentLine::new(2, "* A"), ContentLine::new(4, "body")]
        );
        assert_eq!(
            prepass.unknown_directives,
            vec!["#+TITLE: Notes", "#+STARTUP: fold"]
        );
    }

    #[test]
    fn test_seq_todo_extends_defaults() {
        let prepass = run_prepass(
            "* WAITING x\n#+SEQ_TODO: NEXT(n) WAITING(w) | CANCELLED(c)\n",
            KeywordSet::new(),
        );
        let keywords: Vec<_> = prepass.keywords.iter().collect();
        assert_eq!(keywords, vec!["TODO", "DONE", "NEXT", "WAITING", "CANCELLED"]);
        assert!(prepass.unknown_directives.is_empty());
    }

    #[test]
    fn test_drawers_declaration_is_recorded_only() {
        let prepass = run_prepass("#+DRAWERS: LOGBOOK NOTES\n", KeywordSet::new());
        assert_eq!(prepass.declared_drawers, vec!["LOGBOOK", "NOTES"]);
        assert!(prepass.lines.is_empty());
    }

    #[test]
    fn test_hash_without_plus_is_content() {
        assert_eq!(classify_directive("# a comment"), None);
        assert_eq!(
            classify_directive("#+begin_src rust"),
            Some(Directive::Unknown("#+begin_src rust".to_string()))
        );
    }
}
