//! Row filtering by the values of one numeric column

use serde::{Deserialize, Serialize};

use sel_range::{Placeholder, RangeSpec, ResolveError};

use crate::{FinderError, RowFinder, Table, TrainError, Trainable};

/// Keeps the rows whose value in one numeric column lies within bounds.
///
/// Training resolves `column` against the dataset's column names and checks
/// that it names exactly one numeric column. Null and NaN values never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericRangeRowFinder {
    /// Range naming the column to filter on
    pub column: RangeSpec,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum_exclusive: bool,
    pub maximum_exclusive: bool,

    #[serde(skip)]
    trained_column: Option<usize>,
}

impl Default for NumericRangeRowFinder {
    fn default() -> Self {
        Self {
            column: RangeSpec::single(Placeholder::Last),
            minimum: None,
            maximum: None,
            minimum_exclusive: false,
            maximum_exclusive: false,
            trained_column: None,
        }
    }
}

impl NumericRangeRowFinder {
    pub fn new(column: RangeSpec) -> Self {
        Self {
            column,
            ..Default::default()
        }
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_exclusive_bounds(mut self, minimum: bool, maximum: bool) -> Self {
        self.minimum_exclusive = minimum;
        self.maximum_exclusive = maximum;
        self
    }

    /// Column chosen by the last successful training
    pub fn trained_column(&self) -> Option<usize> {
        self.trained_column
    }

    fn accepts(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let above = match self.minimum {
            Some(min) if self.minimum_exclusive => value > min,
            Some(min) => value >= min,
            None => true,
        };
        let below = match self.maximum {
            Some(max) if self.maximum_exclusive => value < max,
            Some(max) => value <= max,
            None => true,
        };
        above && below
    }
}

impl Trainable for NumericRangeRowFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        self.trained_column = None;

        let columns = self
            .column
            .evaluate(&data.column_domain())
            .map_err(|err| match err {
                ResolveError::UnknownName(name) => TrainError::MissingColumn(name),
                other => TrainError::Range(other),
            })?;

        let index = match columns.as_slice() {
            [index] => *index,
            [] => return Err(TrainError::MissingColumn(self.column.to_string())),
            _ => {
                return Err(TrainError::AmbiguousColumn {
                    range: self.column.to_string(),
                    count: columns.len(),
                })
            }
        };

        if !data.is_numeric(index) {
            let name = data.column_name(index).unwrap_or_default().to_string();
            return Err(TrainError::NotNumeric(name));
        }

        tracing::debug!(column = index, "numeric row filter trained");
        self.trained_column = Some(index);
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.trained_column.is_some()
    }

    fn reset(&mut self) {
        self.trained_column = None;
    }
}

impl RowFinder for NumericRangeRowFinder {
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let column = self
            .trained_column
            .ok_or(FinderError::NotTrained("NumericRangeRowFinder"))?;

        let rows = data
            .numeric_column(column)?
            .into_iter()
            .enumerate()
            .filter_map(|(row, value)| value.filter(|v| self.accepts(*v)).map(|_| row))
            .collect();
        Ok(rows)
    }
}
