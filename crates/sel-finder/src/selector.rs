//! Finder contracts and the capability wrappers around them

use std::fmt;

use crate::null::NullFinder;
use crate::{FinderError, Table, TrainError};

/// Selects rows from a table
pub trait RowFinder: Send {
    /// Indices of the selected rows. Must not modify `data`.
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError>;
}

/// Selects columns from a table.
///
/// Takes `&mut self` because some finders finish their training lazily on
/// first use (see [`RowFilteredColumnFinder`](crate::RowFilteredColumnFinder)).
pub trait ColumnFinder: Send {
    /// Indices of the selected columns. Must not modify `data`.
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError>;
}

/// A finder that has to see a dataset before it can be queried.
///
/// Find operations on an untrained finder return
/// [`FinderError::NotTrained`]. A failed `train` leaves the finder untrained.
pub trait Trainable {
    fn train(&mut self, data: &Table) -> Result<(), TrainError>;

    fn is_trained(&self) -> bool;

    /// Drop any trained state
    fn reset(&mut self);
}

pub trait TrainableRowFinder: RowFinder + Trainable {}

impl<T: RowFinder + Trainable> TrainableRowFinder for T {}

pub trait TrainableColumnFinder: ColumnFinder + Trainable {}

impl<T: ColumnFinder + Trainable> TrainableColumnFinder for T {}

/// A row finder together with its training capability
pub enum RowSelector {
    /// Needs no training; `train` always succeeds
    Plain(Box<dyn RowFinder>),
    Trainable(Box<dyn TrainableRowFinder>),
}

impl RowSelector {
    pub fn plain(finder: impl RowFinder + 'static) -> Self {
        RowSelector::Plain(Box::new(finder))
    }

    pub fn trainable(finder: impl TrainableRowFinder + 'static) -> Self {
        RowSelector::Trainable(Box::new(finder))
    }

    pub fn is_trainable(&self) -> bool {
        matches!(self, RowSelector::Trainable(_))
    }
}

impl RowFinder for RowSelector {
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError> {
        match self {
            RowSelector::Plain(finder) => finder.find_rows(data),
            RowSelector::Trainable(finder) => finder.find_rows(data),
        }
    }
}

impl Trainable for RowSelector {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        match self {
            RowSelector::Plain(_) => Ok(()),
            RowSelector::Trainable(finder) => finder.train(data),
        }
    }

    fn is_trained(&self) -> bool {
        match self {
            RowSelector::Plain(_) => true,
            RowSelector::Trainable(finder) => finder.is_trained(),
        }
    }

    fn reset(&mut self) {
        if let RowSelector::Trainable(finder) = self {
            finder.reset();
        }
    }
}

impl Default for RowSelector {
    fn default() -> Self {
        RowSelector::plain(NullFinder)
    }
}

impl fmt::Debug for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Plain(_) => f.write_str("RowSelector::Plain"),
            RowSelector::Trainable(finder) => f
                .debug_struct("RowSelector::Trainable")
                .field("trained", &finder.is_trained())
                .finish(),
        }
    }
}

/// A column finder together with its training capability
pub enum ColumnSelector {
    /// Needs no training; `train` always succeeds
    Plain(Box<dyn ColumnFinder>),
    Trainable(Box<dyn TrainableColumnFinder>),
}

impl ColumnSelector {
    pub fn plain(finder: impl ColumnFinder + 'static) -> Self {
        ColumnSelector::Plain(Box::new(finder))
    }

    pub fn trainable(finder: impl TrainableColumnFinder + 'static) -> Self {
        ColumnSelector::Trainable(Box::new(finder))
    }

    pub fn is_trainable(&self) -> bool {
        matches!(self, ColumnSelector::Trainable(_))
    }
}

impl ColumnFinder for ColumnSelector {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        match self {
            ColumnSelector::Plain(finder) => finder.find_columns(data),
            ColumnSelector::Trainable(finder) => finder.find_columns(data),
        }
    }
}

impl Trainable for ColumnSelector {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        match self {
            ColumnSelector::Plain(_) => Ok(()),
            ColumnSelector::Trainable(finder) => finder.train(data),
        }
    }

    fn is_trained(&self) -> bool {
        match self {
            ColumnSelector::Plain(_) => true,
            ColumnSelector::Trainable(finder) => finder.is_trained(),
        }
    }

    fn reset(&mut self) {
        if let ColumnSelector::Trainable(finder) = self {
            finder.reset();
        }
    }
}

impl Default for ColumnSelector {
    fn default() -> Self {
        ColumnSelector::plain(NullFinder)
    }
}

impl fmt::Debug for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Plain(_) => f.write_str("ColumnSelector::Plain"),
            ColumnSelector::Trainable(finder) => f
                .debug_struct("ColumnSelector::Trainable")
                .field("trained", &finder.is_trained())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{numbers_table, FailingRowFinder};

    #[test]
    fn test_plain_selector_ignores_training() {
        let table = numbers_table();
        let mut rows = RowSelector::default();
        assert!(!rows.is_trainable());
        assert!(rows.is_trained());
        assert!(rows.train(&table).is_ok());
        assert_eq!(rows.find_rows(&table).unwrap(), vec![0, 1, 2, 3, 4]);

        let mut columns = ColumnSelector::default();
        assert!(columns.train(&table).is_ok());
        assert_eq!(columns.find_columns(&table).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_trainable_selector_delegates() {
        let table = numbers_table();
        let mut rows = RowSelector::trainable(FailingRowFinder);
        assert!(rows.is_trainable());
        assert!(!rows.is_trained());
        assert!(matches!(rows.train(&table), Err(TrainError::MissingColumn(_))));
        assert!(matches!(rows.find_rows(&table), Err(FinderError::NotTrained(_))));
        assert_eq!(format!("{rows:?}"), "RowSelector::Trainable { trained: false }");
    }
}
