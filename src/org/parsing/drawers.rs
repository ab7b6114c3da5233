//! Drawer sub-parsers
//!
//! Two kinds of delimited blocks hang off a heading, both closed by `:END:`:
//!
//!   - the property block (`:PROPERTIES:`), strictly one `:KEY: VALUE` pair per line
//!   - generic drawers (`:LOGBOOK:`, `:NOTES:`, ...), captured verbatim line by line
//!
//! The heading state machine owns the cursor and hands each line to the open sub-parser;
//! the sub-parser reports whether the block is still open. Neither knows about headings,
//! so a heading line inside a drawer is captured as drawer content, and inside a property
//! block it is a malformed property.

use crate::org::error::ParseError;
use crate::org::lexing::line_classification::{is_block_end, split_property};
use crate::org::lexing::ContentLine;

/// Name used for the property block in error reports
pub const PROPERTIES_DRAWER: &str = "PROPERTIES";

/// One line of a property block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyLine<'a> {
    Entry { key: &'a str, value: &'a str },
    Blank,
    End,
}

/// Interpret a line read inside a property block
pub fn parse_property_line(line: &ContentLine) -> Result<PropertyLine<'_>, ParseError> {
    if is_block_end(&line.text) {
        return Ok(PropertyLine::End);
    }
    if line.text.trim().is_empty() {
        return Ok(PropertyLine::Blank);
    }
    match split_property(&line.text) {
        Some((key, value)) => Ok(PropertyLine::Entry { key, value }),
        None => Err(ParseError::MalformedProperty {
            line: line.number,
            text: line.text.clone(),
        }),
    }
}

/// Error for a property block still open at end of input
pub fn unterminated_properties(start_line: usize) -> ParseError {
    ParseError::UnterminatedDrawer {
        name: PROPERTIES_DRAWER.to_string(),
        line: start_line,
    }
}

/// Whether a drawer is still collecting lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerStep {
    Open,
    Closed,
}

/// Content accumulator for an open generic drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerCapture {
    name: String,
    start_line: usize,
    content: String,
}

impl DrawerCapture {
    pub fn open(name: impl Into<String>, start_line: usize) -> Self {
        DrawerCapture {
            name: name.into(),
            start_line,
            content: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed the next line; every captured line is trimmed and newline terminated
    pub fn feed(&mut self, line: &str) -> DrawerStep {
        if is_block_end(line) {
            return DrawerStep::Closed;
        }
        self.content.push_str(line.trim());
        self.content.push('\n');
        DrawerStep::Open
    }

    /// The drawer name and its accumulated content
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.content)
    }

    /// Error for a drawer still open at end of input
    pub fn unterminated(self) -> ParseError {
        ParseError::UnterminatedDrawer {
            name: self.name,
            line: self.start_line,
        }
    }
}
