//! Canonical text form of a parsed range

use std::fmt;

use crate::spec::{Bound, Placeholder, RangeSpec, Segment};

impl RangeSpec {
    /// Render the canonical expression.
    ///
    /// Re-parsing the rendering of a parsed spec yields an equal spec.
    /// Placeholders use their canonical spelling (`last_1` becomes `last-1`)
    /// and whitespace is dropped.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inverted() {
            f.write_str("inv(")?;
        }
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{segment}")?;
        }
        if self.is_inverted() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Single(bound) => write!(f, "{bound}"),
            Segment::Span(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Placeholder(placeholder) => f.write_str(placeholder.keyword()),
            Bound::Index { digits, forced: true, .. } => write!(f, "#{digits}"),
            Bound::Index { digits, forced: false, .. } => f.write_str(digits),
            Bound::Name { name, exact: false } if reads_back_bare(name) => f.write_str(name),
            Bound::Name { name, .. } => write_quoted(f, name),
        }
    }
}

/// Whether a bare name re-parses as the same bare name
fn reads_back_bare(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains(['-', ',', '"', '(', ')'])
        && !name.starts_with('#')
        && !name.bytes().all(|b| b.is_ascii_digit())
        && Placeholder::from_keyword(name).is_none()
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in name.chars() {
        if matches!(ch, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("\"")
}
