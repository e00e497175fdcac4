//! Parsed representation of a range expression

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

/// A named position relative to the size of the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    First,
    Second,
    Third,
    Last,
    LastMinusOne,
    LastMinusTwo,
}

/// Keyword spellings accepted by the parser, longest first so that `last-1`
/// is tried before `last`.
pub(crate) const KEYWORDS: [(&str, Placeholder); 8] = [
    ("last-1", Placeholder::LastMinusOne),
    ("last-2", Placeholder::LastMinusTwo),
    ("last_1", Placeholder::LastMinusOne),
    ("last_2", Placeholder::LastMinusTwo),
    ("second", Placeholder::Second),
    ("first", Placeholder::First),
    ("third", Placeholder::Third),
    ("last", Placeholder::Last),
];

impl Placeholder {
    /// Canonical keyword used when rendering
    pub fn keyword(self) -> &'static str {
        match self {
            Placeholder::First => "first",
            Placeholder::Second => "second",
            Placeholder::Third => "third",
            Placeholder::Last => "last",
            Placeholder::LastMinusOne => "last-1",
            Placeholder::LastMinusTwo => "last-2",
        }
    }

    /// Look up a placeholder by any accepted spelling, ignoring case
    pub fn from_keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(text))
            .map(|&(_, placeholder)| placeholder)
    }

    /// 0-based position within a domain of `size` entries, if it exists
    pub fn position(self, size: usize) -> Option<usize> {
        match self {
            Placeholder::First => (size > 0).then_some(0),
            Placeholder::Second => (size > 1).then_some(1),
            Placeholder::Third => (size > 2).then_some(2),
            Placeholder::Last => size.checked_sub(1),
            Placeholder::LastMinusOne => size.checked_sub(2),
            Placeholder::LastMinusTwo => size.checked_sub(3),
        }
    }
}

/// One end of a span, or a single selected entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bound {
    /// `first`, `last-1`, ...
    Placeholder(Placeholder),
    /// 1-based position. `digits` keeps the text as written (`007`) for
    /// rendering, errors and the fallback to a same-named entry. `forced` is
    /// set by a `#` prefix and disables that fallback.
    Index {
        position: usize,
        digits: String,
        forced: bool,
    },
    /// Entry name. Bare names match case-insensitively, quoted names exactly.
    Name { name: String, exact: bool },
}

impl Bound {
    pub fn index(position: usize) -> Self {
        Bound::Index {
            position,
            digits: position.to_string(),
            forced: false,
        }
    }

    pub fn forced_index(position: usize) -> Self {
        Bound::Index {
            position,
            digits: position.to_string(),
            forced: true,
        }
    }

    /// Parse an index from its written digits
    pub(crate) fn from_digits(digits: &str, forced: bool) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Bound::Index {
            position: digits.parse().ok()?,
            digits: digits.to_string(),
            forced,
        })
    }

    pub fn name(name: impl Into<String>) -> Self {
        Bound::Name { name: name.into(), exact: false }
    }

    pub fn exact_name(name: impl Into<String>) -> Self {
        Bound::Name { name: name.into(), exact: true }
    }
}

impl From<Placeholder> for Bound {
    fn from(placeholder: Placeholder) -> Self {
        Bound::Placeholder(placeholder)
    }
}

/// A comma separated item of a range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Single(Bound),
    /// Inclusive on both ends, in either order
    Span(Bound, Bound),
}

/// Immutable parsed range expression.
///
/// A spec never changes once built; [`RangeSpec::with_max`] returns a new
/// value. The optional `max` is only consulted by [`RangeSpec::indices`],
/// evaluation against a [`NameSource`](crate::NameSource) uses the size the
/// source reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSpec {
    segments: Vec<Segment>,
    inverted: bool,
    max: Option<usize>,
}

impl RangeSpec {
    /// Build a spec from already parsed segments
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            inverted: false,
            max: None,
        }
    }

    /// A spec selecting every entry, including on an empty domain
    pub fn all() -> Self {
        Self::default().inverted()
    }

    /// A spec with a single segment
    pub fn single(bound: impl Into<Bound>) -> Self {
        Self::new(vec![Segment::Single(bound.into())])
    }

    /// Parse a range expression
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        crate::parser::parse(text)
    }

    /// Parse a range expression for a domain of known size
    pub fn parse_with_max(text: &str, max: usize) -> Result<Self, ParseError> {
        Ok(Self::parse(text)?.with_max(max))
    }

    /// Return a copy bound to the given maximum
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Return a copy with the inversion flag toggled
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    pub(crate) fn from_parts(segments: Vec<Segment>, inverted: bool) -> Self {
        Self {
            segments,
            inverted,
            max: None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether the expression has no items (`""` or `inv()`)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for RangeSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// Persisted as the rendered expression; `max` depends on the dataset and is
// not part of the configuration.
impl Serialize for RangeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RangeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
