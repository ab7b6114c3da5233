//! Heading/body state machine
//!
//! Consumes the content lines left by the directive pre-pass and produces the flat node list.
//! One [`NodeBuilder`] is under construction at any time; it is finalized when the next
//! heading starts and at end of input.
//!
//! States and transitions:
//!
//! | State               | Line                  | Action                               | Next state          |
//! |---------------------|-----------------------|--------------------------------------|---------------------|
//! | `TopLevel`          | heading               | finalize builder, start a new one    | `TopLevel`          |
//! | `TopLevel`          | planning              | set pending scheduled/deadline       | `TopLevel`          |
//! | `TopLevel`          | clock, comment, `:END:` | drop                               | `TopLevel`          |
//! | `TopLevel`          | `:PROPERTIES:`        |                                      | `InPropertyBlock`   |
//! | `TopLevel`          | `:NAME:`              | open capture                         | `InGenericDrawer`   |
//! | `TopLevel`          | text                  | append to body                       | `TopLevel`          |
//! | `InPropertyBlock`   | `:KEY: VALUE`         | store property                       | `InPropertyBlock`   |
//! | `InPropertyBlock`   | blank                 | skip                                 | `InPropertyBlock`   |
//! | `InPropertyBlock`   | `:END:`               |                                      | `TopLevel`          |
//! | `InPropertyBlock`   | anything else         | fail, malformed property             |                     |
//! | `InGenericDrawer`   | `:END:`               | store drawer content                 | `TopLevel`          |
//! | `InGenericDrawer`   | anything else         | capture trimmed line                 | `InGenericDrawer`   |
//!
//! End of input in any state but `TopLevel` fails with an unterminated drawer error.

use crate::org::ast::{KeyGenerator, Node, NodeBuilder};
use crate::org::error::ParseError;
use crate::org::lexing::line_classification::split_tags;
use crate::org::lexing::{classify_line, ContentLine, DateMatch, LineType};
use crate::org::parsing::drawers::{
    parse_property_line, unterminated_properties, DrawerCapture, DrawerStep, PropertyLine,
};
use chrono::NaiveDate;
use tracing::{debug, trace, warn};

/// Parser state between two lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    TopLevel,
    InPropertyBlock { start_line: usize },
    InGenericDrawer(DrawerCapture),
}

/// The line-consuming state machine
#[derive(Debug)]
pub struct HeadingMachine {
    state: State,
    current: NodeBuilder,
    seen_heading: bool,
    keys: KeyGenerator,
    nodes: Vec<Node>,
}

impl HeadingMachine {
    pub fn new() -> Self {
        HeadingMachine {
            state: State::TopLevel,
            current: NodeBuilder::preamble(),
            seen_heading: false,
            keys: KeyGenerator::new(),
            nodes: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Consume one content line
    pub fn step(&mut self, line: &ContentLine) -> Result<(), ParseError> {
        let state = std::mem::replace(&mut self.state, State::TopLevel);
        self.state = match state {
            State::TopLevel => self.top_level(line),
            State::InPropertyBlock { start_line } => self.in_property_block(line, start_line)?,
            State::InGenericDrawer(capture) => self.in_generic_drawer(line, capture),
        };
        Ok(())
    }

    /// Finalize the node under construction and return the node list
    pub fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        match std::mem::replace(&mut self.state, State::TopLevel) {
            State::TopLevel => {}
            State::InPropertyBlock { start_line } => {
                return Err(unterminated_properties(start_line))
            }
            State::InGenericDrawer(capture) => return Err(capture.unterminated()),
        }
        let last = std::mem::take(&mut self.current);
        self.push_node(last);
        Ok(self.nodes)
    }

    fn top_level(&mut self, line: &ContentLine) -> State {
        match classify_line(&line.text) {
            LineType::Heading { level, text } => {
                self.start_heading(level, text);
                State::TopLevel
            }
            LineType::Planning {
                scheduled,
                deadline,
            } => {
                if let Some(date) = scheduled.and_then(|d| checked_date(d, line.number)) {
                    self.current.set_scheduled(date);
                }
                if let Some(date) = deadline.and_then(|d| checked_date(d, line.number)) {
                    self.current.set_deadline(date);
                }
                State::TopLevel
            }
            LineType::Clock | LineType::Comment => State::TopLevel,
            LineType::BlockEnd => {
                warn!(line = line.number, "ignoring :END: outside of any drawer");
                State::TopLevel
            }
            LineType::PropertiesStart => State::InPropertyBlock {
                start_line: line.number,
            },
            LineType::DrawerStart { name } => {
                State::InGenericDrawer(DrawerCapture::open(name, line.number))
            }
            LineType::Text => {
                self.current.push_body_line(&line.text);
                State::TopLevel
            }
        }
    }

    fn in_property_block(
        &mut self,
        line: &ContentLine,
        start_line: usize,
    ) -> Result<State, ParseError> {
        Ok(match parse_property_line(line)? {
            PropertyLine::Entry { key, value } => {
                self.current.insert_property(key, value);
                State::InPropertyBlock { start_line }
            }
            PropertyLine::Blank => State::InPropertyBlock { start_line },
            PropertyLine::End => State::TopLevel,
        })
    }

    fn in_generic_drawer(&mut self, line: &ContentLine, mut capture: DrawerCapture) -> State {
        match capture.feed(&line.text) {
            DrawerStep::Open => State::InGenericDrawer(capture),
            DrawerStep::Closed => {
                let (name, content) = capture.into_parts();
                debug!(headline = self.current.headline(), drawer = %name, "processed drawer");
                self.current.insert_drawer(name, content);
                State::TopLevel
            }
        }
    }

    fn start_heading(&mut self, level: usize, text: &str) {
        let previous = std::mem::take(&mut self.current);
        if self.seen_heading || previous.has_content() {
            self.push_node(previous);
        }
        self.seen_heading = true;

        let (headline, tags) = split_tags(text);
        let mut builder = NodeBuilder::new(level, headline);
        for tag in tags {
            builder.add_tag(tag);
        }
        self.current = builder;
    }

    fn push_node(&mut self, builder: NodeBuilder) {
        let node = builder.build(self.keys.next_key());
        trace!(key = %node.key(), level = node.level(), headline = node.headline(), "finalized node");
        self.nodes.push(node);
    }
}

impl Default for HeadingMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_date(date: DateMatch, line: usize) -> Option<NaiveDate> {
    let checked = date.to_date();
    if checked.is_none() {
        warn!(line, ?date, "ignoring invalid calendar date");
    }
    checked
}

/// Run the state machine over all content lines
pub fn build_nodes(lines: &[ContentLine]) -> Result<Vec<Node>, ParseError> {
    let mut machine = HeadingMachine::new();
    for line in lines {
        machine.step(line)?;
    }
    machine.finish()
}
