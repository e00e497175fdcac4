//! Column selection restricted to a subset of rows.
//!
//! [`RowFilteredColumnFinder`] trains in two steps. `train` only trains the
//! row finder; the column finder is trained on the first `find_columns`
//! call, against the rows the row finder picked out of that call's dataset.
//! Later calls reuse that training until the pipeline is trained again.

use crate::{
    ColumnFinder, ColumnSelector, FinderError, RowFinder, RowSelector, Table, TrainError,
    Trainable,
};

/// Where a [`RowFilteredColumnFinder`] is in its training cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PipelineStage {
    /// Never trained, or reset
    #[default]
    Untrained,
    /// The last `train` call failed on the row finder
    RowTrainingFailed,
    /// Row finder trained; the column finder is trained on the next query
    ColumnPending,
    /// Both finders trained
    Ready,
    /// The column finder could not be trained on the row subset. Every query
    /// fails until the pipeline is trained again.
    ColumnTrainingFailed { reason: String },
}

/// Runs a column finder on the rows chosen by a row finder
#[derive(Debug, Default)]
pub struct RowFilteredColumnFinder {
    rows: RowSelector,
    columns: ColumnSelector,
    stage: PipelineStage,
}

impl RowFilteredColumnFinder {
    pub fn new(rows: RowSelector, columns: ColumnSelector) -> Self {
        Self {
            rows,
            columns,
            stage: PipelineStage::Untrained,
        }
    }

    /// Replace the row finder. The pipeline must be trained again.
    pub fn with_row_finder(mut self, rows: RowSelector) -> Self {
        self.rows = rows;
        self.stage = PipelineStage::Untrained;
        self
    }

    /// Replace the column finder. The pipeline must be trained again.
    pub fn with_column_finder(mut self, columns: ColumnSelector) -> Self {
        self.columns = columns;
        self.stage = PipelineStage::Untrained;
        self
    }

    pub fn row_finder(&self) -> &RowSelector {
        &self.rows
    }

    pub fn column_finder(&self) -> &ColumnSelector {
        &self.columns
    }

    pub fn stage(&self) -> &PipelineStage {
        &self.stage
    }

    /// Whether the column finder has been trained on a row subset during the
    /// current training cycle
    pub fn is_column_finder_trained_on_subset(&self) -> bool {
        self.stage == PipelineStage::Ready
    }

    fn train_columns(&mut self, subset: &Table) -> Result<(), FinderError> {
        match self.columns.train(subset) {
            Ok(()) => {
                tracing::info!(rows = subset.row_count(), "column finder trained on row subset");
                self.stage = PipelineStage::Ready;
                Ok(())
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(%reason, "column finder failed to train on row subset");
                self.stage = PipelineStage::ColumnTrainingFailed {
                    reason: reason.clone(),
                };
                Err(FinderError::ColumnTrainingFailed { reason })
            }
        }
    }
}

impl Trainable for RowFilteredColumnFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        match self.rows.train(data) {
            Ok(()) => {
                tracing::info!(rows = data.row_count(), "row finder trained");
                self.stage = PipelineStage::ColumnPending;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "row finder failed to train");
                self.stage = PipelineStage::RowTrainingFailed;
                Err(err)
            }
        }
    }

    fn is_trained(&self) -> bool {
        matches!(
            self.stage,
            PipelineStage::ColumnPending | PipelineStage::Ready
        )
    }

    fn reset(&mut self) {
        self.rows.reset();
        self.columns.reset();
        self.stage = PipelineStage::Untrained;
    }
}

impl ColumnFinder for RowFilteredColumnFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        match &self.stage {
            PipelineStage::Untrained | PipelineStage::RowTrainingFailed => {
                return Err(FinderError::NotTrained("RowFilteredColumnFinder"))
            }
            PipelineStage::ColumnTrainingFailed { reason } => {
                return Err(FinderError::ColumnTrainingFailed {
                    reason: reason.clone(),
                })
            }
            PipelineStage::ColumnPending | PipelineStage::Ready => {}
        }

        let rows = self.rows.find_rows(data)?;
        let subset = data.select_rows(&rows)?;
        tracing::debug!(
            rows = rows.len(),
            of = data.row_count(),
            "selected row subset for column finder"
        );

        if self.stage == PipelineStage::ColumnPending {
            self.train_columns(&subset)?;
        }

        self.columns.find_columns(&subset)
    }
}
