//! Range expressions for selecting rows and columns
//!
//! A range is a comma separated list of 1-based indices, names, placeholders
//! and spans, optionally wrapped in `inv(...)` to select the complement:
//!
//! ```text
//! first-3,sepal,"petal-width",#12,last
//! inv(2-last-1)
//! ```
//!
//! Parsing produces an immutable [`RangeSpec`] that has no knowledge of any
//! dataset. Evaluating it against a [`NameSource`] (anything that can report
//! a size and the name at each position) yields concrete 0-based indices.

mod parser;
mod render;
mod resolve;
mod spec;

pub use resolve::{eq_ignore_case, fold_case, NameSource, Unnamed};
pub use spec::{Bound, Placeholder, RangeSpec, Segment};

use thiserror::Error;

/// Errors raised while parsing a range expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unterminated quote in range '{0}'")]
    UnterminatedQuote(String),

    #[error("Missing closing parenthesis for inv( in range '{0}'")]
    UnbalancedInversion(String),

    #[error("Nested inv( is not supported in range '{0}'")]
    NestedInversion(String),

    #[error("Empty item in range '{0}'")]
    EmptyItem(String),

    #[error("Missing bound in range item '{0}'")]
    MissingBound(String),

    #[error("Invalid index '{0}'")]
    InvalidIndex(String),

    #[error("Unexpected '{token}' in range item '{item}'")]
    UnexpectedToken { token: String, item: String },
}

/// Errors raised while resolving a parsed range against a domain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown name '{0}'")]
    UnknownName(String),

    #[error("'{token}' is out of bounds for {size} entries")]
    OutOfBounds { token: String, size: usize },

    #[error("Range '{0}' has no maximum to resolve against")]
    UnknownSize(String),
}

impl ResolveError {
    /// The token that failed to resolve
    pub fn token(&self) -> &str {
        match self {
            ResolveError::UnknownName(name) => name,
            ResolveError::OutOfBounds { token, .. } => token,
            ResolveError::UnknownSize(range) => range,
        }
    }
}
