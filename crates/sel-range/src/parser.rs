//! Hand-written scanner for range expressions

use crate::spec::{Bound, RangeSpec, Segment, KEYWORDS};
use crate::ParseError;

const INVERT_PREFIX: &str = "inv(";

/// Parse a full range expression
pub(crate) fn parse(text: &str) -> Result<RangeSpec, ParseError> {
    let (body, inverted) = strip_inversion(text.trim())?;
    if body.trim().is_empty() {
        return Ok(RangeSpec::from_parts(Vec::new(), inverted));
    }

    let segments = split_items(body)?
        .into_iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(range = text, segments = segments.len(), inverted, "parsed range");
    Ok(RangeSpec::from_parts(segments, inverted))
}

/// Case-insensitive ASCII prefix test that never splits a UTF-8 sequence
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn strip_inversion(text: &str) -> Result<(&str, bool), ParseError> {
    if !starts_with_ignore_case(text, INVERT_PREFIX) {
        return Ok((text, false));
    }

    let Some(inner) = text[INVERT_PREFIX.len()..].strip_suffix(')') else {
        return Err(ParseError::UnbalancedInversion(text.to_string()));
    };
    if starts_with_ignore_case(inner.trim_start(), INVERT_PREFIX) {
        return Err(ParseError::NestedInversion(text.to_string()));
    }
    if unquoted(inner).any(|(_, ch)| matches!(ch, '(' | ')')) {
        return Err(ParseError::UnbalancedInversion(text.to_string()));
    }

    Ok((inner, true))
}

/// Characters outside double quotes, with their byte offsets
fn unquoted(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut in_quote = false;
    let mut escaped = false;
    text.char_indices().filter(move |&(_, ch)| {
        if escaped {
            escaped = false;
            return false;
        }
        match ch {
            '\\' if in_quote => {
                escaped = true;
                false
            }
            '"' => {
                in_quote = !in_quote;
                false
            }
            _ => !in_quote,
        }
    })
}

/// Split on commas that are not inside quotes
fn split_items(body: &str) -> Result<Vec<&str>, ParseError> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;

    for (pos, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                items.push(&body[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    if in_quote {
        return Err(ParseError::UnterminatedQuote(body.to_string()));
    }
    items.push(&body[start..]);

    items
        .into_iter()
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                Err(ParseError::EmptyItem(body.to_string()))
            } else {
                Ok(item)
            }
        })
        .collect()
}

fn parse_item(item: &str) -> Result<Segment, ParseError> {
    let mut cursor = Cursor::new(item);

    let start = parse_bound(&mut cursor)?;
    cursor.skip_whitespace();
    if cursor.is_done() {
        return Ok(Segment::Single(start));
    }
    if cursor.peek() != Some('-') {
        return Err(cursor.unexpected());
    }
    cursor.bump();

    let end = parse_bound(&mut cursor)?;
    cursor.skip_whitespace();
    if !cursor.is_done() {
        return Err(cursor.unexpected());
    }

    Ok(Segment::Span(start, end))
}

fn parse_bound(cursor: &mut Cursor<'_>) -> Result<Bound, ParseError> {
    cursor.skip_whitespace();
    match cursor.peek() {
        None | Some('-') => Err(ParseError::MissingBound(cursor.text.to_string())),
        Some('"') => cursor.quoted().map(Bound::exact_name),
        Some('#') => {
            cursor.bump();
            let digits = cursor.bare()?;
            Bound::from_digits(digits, true)
                .ok_or_else(|| ParseError::InvalidIndex(format!("#{digits}")))
        }
        Some(_) => {
            if let Some(bound) = cursor.placeholder() {
                return Ok(bound);
            }
            let token = cursor.bare()?;
            if token.bytes().all(|b| b.is_ascii_digit()) {
                Bound::from_digits(token, false)
                    .ok_or_else(|| ParseError::InvalidIndex(token.to_string()))
            } else {
                Ok(Bound::name(token))
            }
        }
    }
}

/// Position within a single range item
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            token: self.rest().to_string(),
            item: self.text.to_string(),
        }
    }

    /// A keyword only counts when nothing but whitespace or a span separator
    /// follows it, so `lastname` and `last-10` are not placeholders.
    fn placeholder(&mut self) -> Option<Bound> {
        let rest = self.rest();
        for &(keyword, placeholder) in KEYWORDS.iter() {
            if !starts_with_ignore_case(rest, keyword) {
                continue;
            }
            let after = rest[keyword.len()..].trim_start();
            if after.is_empty() || after.starts_with('-') {
                self.pos += keyword.len();
                return Some(Bound::Placeholder(placeholder));
            }
        }
        None
    }

    /// Unquoted token up to the next span separator, trimmed. Quotes and
    /// parentheses are only allowed inside quoted names.
    fn bare(&mut self) -> Result<&'a str, ParseError> {
        let rest = self.rest();
        let end = rest.find(['-', '"', '(', ')']).unwrap_or(rest.len());
        if rest[end..].starts_with(['"', '(', ')']) {
            self.pos += end;
            return Err(self.unexpected());
        }
        self.pos += end;
        Ok(rest[..end].trim())
    }

    /// Quoted name with `\"` and `\\` escapes; the opening quote is current
    fn quoted(&mut self) -> Result<String, ParseError> {
        self.bump();
        let mut name = String::new();
        while let Some(ch) = self.bump() {
            match ch {
                '"' => return Ok(name),
                '\\' => match self.bump() {
                    Some(escaped) => name.push(escaped),
                    None => break,
                },
                other => name.push(other),
            }
        }
        Err(ParseError::UnterminatedQuote(self.text.to_string()))
    }
}
