//! Line Classification
//!
//! Assigns a [`LineType`] to every content line. The grammar is line local: a line's type
//! depends only on its own text, never on its neighbours. Whether a `:NAME:` line opens a
//! drawer or is swallowed by one that is already open is the state machine's business.
//!
//! Classification order:
//!
//!   1. heading           `*+ text`
//!   2. planning          contains `SCHEDULED: <YYYY-MM-DD` and/or `DEADLINE: <YYYY-MM-DD`
//!   3. clock             `CLOCK: [...]`, recognized only to be dropped
//!   4. properties start  `:PROPERTIES:`
//!   5. block end         `:END:`
//!   6. drawer start      `:NAME:`
//!   7. comment           starts with `#`
//!   8. text              everything else

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*+)\s+(.*?)\s*$").unwrap());
static TAGS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(.*?)\s+)?:((?:[\w@#%]+:)+)$").unwrap());
static SCHEDULED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SCHEDULED:\s*<(\d{4})-(\d{1,2})-(\d{1,2})").unwrap());
static DEADLINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"DEADLINE:\s*<(\d{4})-(\d{1,2})-(\d{1,2})").unwrap());
static CLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*CLOCK:\s*\[[-0-9]+\s+.*\d:\d\d\]").unwrap());
static PROPERTIES_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:PROPERTIES:\s*$").unwrap());
static BLOCK_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*:END:\s*$").unwrap());
static DRAWER_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:([A-Za-z0-9_]+):\s*$").unwrap());
static PROPERTY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:([\w-]+):\s*(.*?)\s*$").unwrap());

/// Raw `YYYY-MM-DD` captured from a planning line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateMatch {
    fn from_captures(caps: &regex::Captures<'_>) -> Option<Self> {
        Some(DateMatch {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
            day: caps[3].parse().ok()?,
        })
    }

    /// The calendar date, or `None` if the digits do not name a real day
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// The type of a content line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType<'a> {
    Heading {
        level: usize,
        text: &'a str,
    },
    Planning {
        scheduled: Option<DateMatch>,
        deadline: Option<DateMatch>,
    },
    Clock,
    PropertiesStart,
    BlockEnd,
    DrawerStart {
        name: &'a str,
    },
    Comment,
    Text,
}

/// Determine the type of a content line
pub fn classify_line(line: &str) -> LineType<'_> {
    if let Some(caps) = HEADING_REGEX.captures(line) {
        let level = caps.get(1).map_or(0, |m| m.len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return LineType::Heading { level, text };
    }
    let scheduled = SCHEDULED_REGEX
        .captures(line)
        .and_then(|caps| DateMatch::from_captures(&caps));
    let deadline = DEADLINE_REGEX
        .captures(line)
        .and_then(|caps| DateMatch::from_captures(&caps));
    if scheduled.is_some() || deadline.is_some() {
        return LineType::Planning {
            scheduled,
            deadline,
        };
    }
    if CLOCK_REGEX.is_match(line) {
        return LineType::Clock;
    }
    if PROPERTIES_START_REGEX.is_match(line) {
        return LineType::PropertiesStart;
    }
    if BLOCK_END_REGEX.is_match(line) {
        return LineType::BlockEnd;
    }
    if let Some(name) = DRAWER_START_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
    {
        return LineType::DrawerStart {
            name: name.as_str(),
        };
    }
    if line.starts_with('#') {
        return LineType::Comment;
    }
    LineType::Text
}

/// Whether the line closes a drawer or property block
pub fn is_block_end(line: &str) -> bool {
    BLOCK_END_REGEX.is_match(line)
}

/// Split a `:KEY: VALUE` line into its key and trimmed value
pub fn split_property(line: &str) -> Option<(&str, &str)> {
    let caps = PROPERTY_REGEX.captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2).map_or("", |m| m.as_str());
    Some((key, value))
}

/// Split heading text into the headline and its trailing `:tag:tag:` block
///
/// Returns the headline without tags and the tags in source order.
pub fn split_tags(text: &str) -> (&str, Vec<&str>) {
    match TAGS_REGEX.captures(text) {
        Some(caps) => {
            let headline = caps.get(1).map_or("", |m| m.as_str());
            let tags = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .split(':')
                .filter(|tag| !tag.is_empty())
                .collect();
            (headline, tags)
        }
        None => (text, Vec::new()),
    }
}
