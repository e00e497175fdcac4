//! Arrow-backed table with named columns and optional row names

use std::fmt;

use ahash::AHashMap;
use arrow::array::{Array, ArrayRef, AsArray, UInt64Array};
use arrow::compute::{cast, take_record_batch};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use arrow::util::pretty::pretty_format_batches;
use sel_range::fold_case;

use crate::names::{ColumnNames, RowNames};
use crate::DataError;

/// Read-only tabular dataset handed to the finders.
///
/// Columns come from an Arrow [`RecordBatch`] supplied by whatever loaded
/// the data. Rows may optionally carry names so that row ranges can refer to
/// them.
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
    row_names: Option<Vec<String>>,
    /// Case-folded column name -> first column with that name
    column_lookup: AHashMap<String, usize>,
}

impl Table {
    /// Wrap a record batch
    pub fn new(batch: RecordBatch) -> Self {
        let mut column_lookup = AHashMap::new();
        for (index, field) in batch.schema_ref().fields().iter().enumerate() {
            column_lookup.entry(fold_case(field.name())).or_insert(index);
        }

        Self {
            batch,
            row_names: None,
            column_lookup,
        }
    }

    /// Build a table from named columns of equal length
    pub fn try_from_columns<I, S>(columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        Ok(Self::new(RecordBatch::try_from_iter(columns)?))
    }

    /// Attach one name per row
    pub fn with_row_names(mut self, names: Vec<String>) -> Result<Self, DataError> {
        if names.len() != self.row_count() {
            return Err(DataError::RowNameCount {
                expected: self.row_count(),
                found: names.len(),
            });
        }
        self.row_names = Some(names);
        Ok(self)
    }

    /// The underlying record batch
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_count(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.batch
            .schema_ref()
            .fields()
            .get(index)
            .map(|field| field.name().as_str())
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    pub fn row_name(&self, index: usize) -> Option<&str> {
        self.row_names
            .as_ref()
            .and_then(|names| names.get(index))
            .map(String::as_str)
    }

    pub fn has_row_names(&self) -> bool {
        self.row_names.is_some()
    }

    /// First column whose name matches, ignoring case
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_lookup.get(&fold_case(name)).copied()
    }

    pub fn column(&self, index: usize) -> Option<&ArrayRef> {
        self.batch.columns().get(index)
    }

    /// Whether the column holds integers, floats or decimals
    pub fn is_numeric(&self, index: usize) -> bool {
        self.column(index)
            .is_some_and(|column| column.data_type().is_numeric())
    }

    /// Display form of a single cell; nulls render as an empty string
    pub fn value(&self, row: usize, column: usize) -> Result<String, DataError> {
        let array = self.checked_column(column)?;
        self.check_row(row)?;
        Ok(array_value_to_string(array.as_ref(), row)?)
    }

    /// A column converted to `f64`, with nulls (and unparsable text) as `None`
    pub fn numeric_column(&self, column: usize) -> Result<Vec<Option<f64>>, DataError> {
        let array = self.checked_column(column)?;
        let values = cast(array.as_ref(), &DataType::Float64)?;
        Ok(values.as_primitive::<Float64Type>().iter().collect())
    }

    /// Copy the given rows, in the given order, into a new table.
    ///
    /// The copy shares no buffers with `self`; row names follow their rows.
    pub fn select_rows(&self, rows: &[usize]) -> Result<Table, DataError> {
        let row_count = self.row_count();
        if let Some(&index) = rows.iter().find(|&&row| row >= row_count) {
            return Err(DataError::RowOutOfBounds {
                index,
                rows: row_count,
            });
        }

        let indices = UInt64Array::from_iter_values(rows.iter().map(|&row| row as u64));
        let batch = take_record_batch(&self.batch, &indices)?;
        let row_names = self
            .row_names
            .as_ref()
            .map(|names| rows.iter().map(|&row| names[row].clone()).collect());

        tracing::debug!(
            source_rows = row_count,
            selected_rows = rows.len(),
            "copied row subset"
        );

        Ok(Table {
            batch,
            row_names,
            column_lookup: self.column_lookup.clone(),
        })
    }

    /// Column names as a range name source
    pub fn column_domain(&self) -> ColumnNames<'_> {
        ColumnNames::new(self)
    }

    /// Row names as a range name source
    pub fn row_domain(&self) -> RowNames<'_> {
        RowNames::new(self)
    }

    fn checked_column(&self, index: usize) -> Result<&ArrayRef, DataError> {
        self.column(index).ok_or(DataError::ColumnOutOfBounds {
            index,
            columns: self.column_count(),
        })
    }

    fn check_row(&self, index: usize) -> Result<(), DataError> {
        if index < self.row_count() {
            Ok(())
        } else {
            Err(DataError::RowOutOfBounds {
                index,
                rows: self.row_count(),
            })
        }
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = pretty_format_batches(std::slice::from_ref(&self.batch)).map_err(|_| fmt::Error)?;
        write!(f, "{pretty}")
    }
}
