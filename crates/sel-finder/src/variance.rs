//! Column selection by sample variance

use serde::{Deserialize, Serialize};

use sel_range::RangeSpec;

use crate::{ColumnFinder, FinderError, Table, TrainError, Trainable};

/// Selects the numeric columns whose sample variance exceeds `threshold`.
///
/// Which columns qualify is decided once, at training time; later queries
/// return the same column set as long as the dataset has the same number of
/// columns. Null and NaN values are ignored, and a column with fewer than two
/// usable values is never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarianceColumnFinder {
    pub threshold: f64,
    /// Columns considered during training
    pub candidates: RangeSpec,

    #[serde(skip)]
    trained: Option<TrainedVariance>,
}

#[derive(Debug, Clone, PartialEq)]
struct TrainedVariance {
    columns: usize,
    selected: Vec<usize>,
}

impl Default for VarianceColumnFinder {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            candidates: RangeSpec::all(),
            trained: None,
        }
    }
}

impl VarianceColumnFinder {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_candidates(mut self, candidates: RangeSpec) -> Self {
        self.candidates = candidates;
        self
    }

    /// Columns chosen by the last successful training
    pub fn selected(&self) -> Option<&[usize]> {
        self.trained.as_ref().map(|t| t.selected.as_slice())
    }
}

/// Unbiased sample variance of the non-null, non-NaN values
fn sample_variance(values: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(squares / (n - 1.0))
}

impl Trainable for VarianceColumnFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        self.trained = None;

        let candidates = self.candidates.evaluate(&data.column_domain())?;
        let mut selected = Vec::new();
        for column in candidates {
            if !data.is_numeric(column) {
                continue;
            }
            match sample_variance(&data.numeric_column(column)?) {
                Some(variance) if variance > self.threshold => selected.push(column),
                Some(variance) => {
                    tracing::trace!(column, variance, "column below variance threshold")
                }
                None => tracing::trace!(column, "too few values for a variance"),
            }
        }
        selected.sort_unstable();

        tracing::debug!(
            rows = data.row_count(),
            selected = selected.len(),
            "variance finder trained"
        );
        self.trained = Some(TrainedVariance {
            columns: data.column_count(),
            selected,
        });
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    fn reset(&mut self) {
        self.trained = None;
    }
}

impl ColumnFinder for VarianceColumnFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let trained = self
            .trained
            .as_ref()
            .ok_or(FinderError::NotTrained("VarianceColumnFinder"))?;
        if trained.columns != data.column_count() {
            return Err(FinderError::LayoutMismatch {
                expected: trained.columns,
                found: data.column_count(),
            });
        }
        Ok(trained.selected.clone())
    }
}
