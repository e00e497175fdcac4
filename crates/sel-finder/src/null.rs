//! Pass-through finder

use serde::{Deserialize, Serialize};

use crate::{ColumnFinder, FinderError, RowFinder, Table, TrainError, Trainable};

/// Selects every row and every column. Always trained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullFinder;

impl RowFinder for NullFinder {
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError> {
        Ok((0..data.row_count()).collect())
    }
}

impl ColumnFinder for NullFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        Ok((0..data.column_count()).collect())
    }
}

impl Trainable for NullFinder {
    fn train(&mut self, _data: &Table) -> Result<(), TrainError> {
        Ok(())
    }

    fn is_trained(&self) -> bool {
        true
    }

    fn reset(&mut self) {}
}
