//! Row and column finders
//!
//! A [`RowFinder`] picks rows out of a [`Table`], a [`ColumnFinder`] picks
//! columns. Finders that need to look at a dataset before they can answer
//! also implement [`Trainable`]; whether a finder is trainable is fixed when
//! it is wrapped in a [`RowSelector`] or [`ColumnSelector`].
//!
//! [`RowFilteredColumnFinder`] chains the two: it selects rows, copies them
//! into a subset table, and trains and queries its column finder on that
//! subset.
//!
//! ```text
//!   Table ──► row finder ──► row subset ──► column finder ──► columns
//! ```

pub mod multi;
pub mod null;
pub mod numeric;
pub mod range;
pub mod row_filtered;
pub mod selector;
pub mod variance;

#[cfg(test)]
mod testing;

use sel_data::DataError;
use sel_range::ResolveError;
use thiserror::Error;

// Re-exports
pub use multi::{Combination, MultiColumnFinder, MultiRowFinder};
pub use null::NullFinder;
pub use numeric::NumericRangeRowFinder;
pub use range::{RangeColumnFinder, RangeRowFinder};
pub use row_filtered::{PipelineStage, RowFilteredColumnFinder};
pub use sel_data::Table;
pub use selector::{
    ColumnFinder, ColumnSelector, RowFinder, RowSelector, Trainable, TrainableColumnFinder,
    TrainableRowFinder,
};
pub use variance::VarianceColumnFinder;

/// Reasons a finder could not be trained on a dataset
#[derive(Error, Debug)]
pub enum TrainError {
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Range '{range}' selects {count} columns, expected exactly one")]
    AmbiguousColumn { range: String, count: usize },

    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Finder #{index} failed to train: {source}")]
    Child {
        index: usize,
        #[source]
        source: Box<TrainError>,
    },

    #[error("Range error: {0}")]
    Range(#[from] ResolveError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Errors returned by find operations
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("{0} has not been trained")]
    NotTrained(&'static str),

    /// The pipeline could not train its column finder on the row subset, so
    /// it has no meaningful column set to report.
    #[error("Column finder could not be trained on the row subset: {reason}")]
    ColumnTrainingFailed { reason: String },

    #[error("Dataset has {found} columns, finder was trained on {expected}")]
    LayoutMismatch { expected: usize, found: usize },

    #[error("Range error: {0}")]
    Range(#[from] ResolveError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}
