//! Evaluation of a parsed range against a named domain

use indexmap::IndexSet;

use crate::spec::{Bound, RangeSpec, Segment};
use crate::ResolveError;

/// Anything a range can be resolved against: a size and optional names
pub trait NameSource {
    /// Number of entries in the domain
    fn size(&self) -> usize;

    /// Name of the entry at a 0-based position, if it has one
    fn name_at(&self, index: usize) -> Option<&str>;

    /// First entry matching `name`, exactly or ignoring case
    fn position_of(&self, name: &str, exact: bool) -> Option<usize> {
        (0..self.size()).find(|&index| {
            self.name_at(index).is_some_and(|candidate| {
                if exact {
                    candidate == name
                } else {
                    eq_ignore_case(candidate, name)
                }
            })
        })
    }
}

/// A domain with a size but no names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unnamed(pub usize);

impl NameSource for Unnamed {
    fn size(&self) -> usize {
        self.0
    }

    fn name_at(&self, _index: usize) -> Option<&str> {
        None
    }
}

impl<S: AsRef<str>> NameSource for [S] {
    fn size(&self) -> usize {
        self.len()
    }

    fn name_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> NameSource for Vec<S> {
    fn size(&self) -> usize {
        self.len()
    }

    fn name_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

/// Lowercase a name the same way name matching does
pub fn fold_case(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Compare two names ignoring case
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl RangeSpec {
    /// Resolve the range to 0-based indices.
    ///
    /// Non-inverted results keep first-seen order with duplicates removed,
    /// spans expand in ascending order. Inverted results are the ascending
    /// complement within `0..names.size()`.
    pub fn evaluate<N: NameSource + ?Sized>(&self, names: &N) -> Result<Vec<usize>, ResolveError> {
        let size = names.size();
        let mut selected = IndexSet::new();

        for segment in self.segments() {
            match segment {
                Segment::Single(bound) => {
                    selected.insert(resolve_bound(bound, names)?);
                }
                Segment::Span(start, end) => {
                    let start = resolve_bound(start, names)?;
                    let end = resolve_bound(end, names)?;
                    selected.extend(start.min(end)..=start.max(end));
                }
            }
        }

        let indices: Vec<usize> = if self.is_inverted() {
            (0..size).filter(|index| !selected.contains(index)).collect()
        } else {
            selected.into_iter().collect()
        };

        tracing::trace!(range = %self, size, selected = indices.len(), "evaluated range");
        Ok(indices)
    }

    /// Resolve against an unnamed domain of `max` entries
    pub fn indices(&self) -> Result<Vec<usize>, ResolveError> {
        match self.max() {
            Some(max) => self.evaluate(&Unnamed(max)),
            None if self.is_empty() && !self.is_inverted() => Ok(Vec::new()),
            None => Err(ResolveError::UnknownSize(self.render())),
        }
    }
}

fn resolve_bound<N: NameSource + ?Sized>(bound: &Bound, names: &N) -> Result<usize, ResolveError> {
    let size = names.size();
    match bound {
        Bound::Placeholder(placeholder) => {
            placeholder
                .position(size)
                .ok_or_else(|| ResolveError::OutOfBounds {
                    token: placeholder.keyword().to_string(),
                    size,
                })
        }
        Bound::Index {
            position,
            digits,
            forced,
        } => {
            if (1..=size).contains(position) {
                return Ok(position - 1);
            }
            // Bare digits that miss fall back to an entry with that name
            if !forced {
                if let Some(index) = names.position_of(digits, true) {
                    return Ok(index);
                }
            }
            Err(ResolveError::OutOfBounds {
                token: bound.to_string(),
                size,
            })
        }
        Bound::Name { name, exact } => names
            .position_of(name, *exact)
            .ok_or_else(|| ResolveError::UnknownName(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTERS: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn eval(text: &str, names: &[&str]) -> Vec<usize> {
        RangeSpec::parse(text).unwrap().evaluate(names).unwrap()
    }

    fn eval_err(text: &str, names: &[&str]) -> ResolveError {
        RangeSpec::parse(text).unwrap().evaluate(names).unwrap_err()
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(eval("first", &LETTERS), vec![0]);
        assert_eq!(eval("second", &LETTERS), vec![1]);
        assert_eq!(eval("third", &LETTERS), vec![2]);
        assert_eq!(eval("last", &LETTERS), vec![4]);
        assert_eq!(eval("last-1", &LETTERS), vec![3]);
        assert_eq!(eval("last-2", &LETTERS), vec![2]);
        assert_eq!(eval("first-last", &LETTERS), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_names() {
        assert_eq!(eval("b,d", &LETTERS), vec![1, 3]);
        assert_eq!(eval("D,B", &LETTERS), vec![3, 1]);
        assert_eq!(eval("b-d", &LETTERS), vec![1, 2, 3]);

        let names = ["id", "x,y", "Mixed", "mixed"];
        assert_eq!(eval("\"x,y\"", &names), vec![1]);
        assert_eq!(eval("MIXED", &names), vec![2]);
        assert_eq!(eval("\"mixed\"", &names), vec![3]);
        assert_eq!(eval_err("\"MIXED\"", &names), ResolveError::UnknownName("MIXED".into()));
        assert_eq!(eval_err("x", &names), ResolveError::UnknownName("x".into()));
    }

    #[test]
    fn test_spans_in_either_order() {
        assert_eq!(eval("2-4", &LETTERS), vec![1, 2, 3]);
        assert_eq!(eval("4-2", &LETTERS), vec![1, 2, 3]);
        assert_eq!(eval("last-first", &LETTERS), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        assert_eq!(eval("3,1-4,2,last", &LETTERS), vec![2, 0, 1, 3, 4]);
        assert_eq!(eval("c,3,#3", &LETTERS), vec![2]);
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        assert_eq!(
            eval_err("6", &LETTERS),
            ResolveError::OutOfBounds { token: "6".into(), size: 5 }
        );
        assert_eq!(
            eval_err("0", &LETTERS),
            ResolveError::OutOfBounds { token: "0".into(), size: 5 }
        );
        assert_eq!(
            eval_err("2-9", &LETTERS),
            ResolveError::OutOfBounds { token: "9".into(), size: 5 }
        );
        assert_eq!(
            eval_err("third", &["a", "b"]),
            ResolveError::OutOfBounds { token: "third".into(), size: 2 }
        );
        assert_eq!(eval_err("last", &[]).token(), "last");
    }

    #[test]
    fn test_numeric_wins_over_names() {
        let names = ["3", "12", "x"];
        // In bounds: numeric
        assert_eq!(eval("3", &names), vec![2]);
        // Out of bounds: falls back to the entry named "12"
        assert_eq!(eval("12", &names), vec![1]);
        // Forced numeric never falls back
        assert!(matches!(eval_err("#12", &names), ResolveError::OutOfBounds { .. }));
        // Quoting forces a name
        assert_eq!(eval("\"3\"", &names), vec![0]);
    }

    #[test]
    fn test_fallback_uses_digits_as_written() {
        let names = ["a", "007"];
        assert_eq!(eval("007", &names), vec![1]);
        assert_eq!(
            eval_err("7", &names),
            ResolveError::OutOfBounds { token: "7".into(), size: 2 }
        );
        assert_eq!(
            eval_err("#007", &names),
            ResolveError::OutOfBounds { token: "#007".into(), size: 2 }
        );
        assert_eq!(
            eval_err("1-009", &names),
            ResolveError::OutOfBounds { token: "009".into(), size: 2 }
        );
        assert_eq!(eval("01", &names), vec![0]);
    }

    #[test]
    fn test_empty_and_inverted() {
        assert!(eval("", &LETTERS).is_empty());
        assert_eq!(eval("inv()", &LETTERS), vec![0, 1, 2, 3, 4]);
        assert_eq!(eval("inv(2-3)", &LETTERS), vec![0, 3, 4]);
        assert_eq!(eval("inv(last,first)", &LETTERS), vec![1, 2, 3]);
        assert!(eval("inv(first-last)", &LETTERS).is_empty());
        assert!(eval("inv()", &[]).is_empty());
        assert_eq!(RangeSpec::all().evaluate(&LETTERS[..]).unwrap().len(), 5);
    }

    #[test]
    fn test_inversion_is_complement() {
        let names = ["a", "b", "c", "d", "e", "f"];
        for text in ["1", "2-4", "last,first", "b,4-last", "third-second", "c,c,c"] {
            let plain = eval(text, &names);
            let inverted = eval(&format!("inv({text})"), &names);

            for index in 0..names.len() {
                assert_ne!(plain.contains(&index), inverted.contains(&index), "{text} @ {index}");
            }
            assert!(inverted.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_results_in_bounds_without_duplicates() {
        let ranges = [
            "first-last",
            "last-2-last,1,1",
            "inv(2)",
            "3-1,2-5",
            "second,third,second",
            "1-last-1",
        ];
        for size in 5..9 {
            let names: Vec<String> = (0..size).map(|i| format!("col{i}")).collect();
            for text in ranges {
                let indices = RangeSpec::parse(text).unwrap().evaluate(&names).unwrap();
                assert!(indices.iter().all(|&i| i < size), "{text} on {size}");

                let mut unique = indices.clone();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), indices.len(), "{text} on {size}");
            }
        }
    }

    #[test]
    fn test_indices_with_max() {
        let spec = RangeSpec::parse_with_max("2-last", 4).unwrap();
        assert_eq!(spec.indices().unwrap(), vec![1, 2, 3]);

        let unbounded = RangeSpec::parse("2-last").unwrap();
        assert!(matches!(unbounded.indices(), Err(ResolveError::UnknownSize(_))));
        assert!(RangeSpec::parse("").unwrap().indices().unwrap().is_empty());

        // Names need a named domain
        let named = RangeSpec::parse_with_max("b", 4).unwrap();
        assert_eq!(named.indices(), Err(ResolveError::UnknownName("b".into())));
    }

    #[test]
    fn test_case_folding() {
        assert!(eq_ignore_case("Ärger", "äRGER"));
        assert_eq!(fold_case("MiXeD"), "mixed");
    }
}
