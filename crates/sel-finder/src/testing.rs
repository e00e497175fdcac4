//! Shared fixtures and test doubles

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use parking_lot::Mutex;

use crate::{ColumnFinder, FinderError, RowFinder, Table, TrainError, Trainable};

/// Route tracing output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// 5 rows x 3 columns: `id`, `value`, `group`
pub fn numbers_table() -> Table {
    Table::try_from_columns([
        ("id", Arc::new(Int64Array::from(vec![1, 2, 3, 4, 5])) as ArrayRef),
        (
            "value",
            Arc::new(Float64Array::from(vec![
                Some(0.5),
                Some(2.0),
                None,
                Some(8.0),
                Some(3.5),
            ])) as ArrayRef,
        ),
        (
            "group",
            Arc::new(StringArray::from(vec!["a", "b", "a", "b", "a"])) as ArrayRef,
        ),
    ])
    .unwrap()
    .with_row_names(["r1", "r2", "r3", "r4", "r5"].map(String::from).to_vec())
    .unwrap()
}

/// A row finder whose training always fails, as if its column were missing
pub struct FailingRowFinder;

impl RowFinder for FailingRowFinder {
    fn find_rows(&self, _data: &Table) -> Result<Vec<usize>, FinderError> {
        Err(FinderError::NotTrained("FailingRowFinder"))
    }
}

impl Trainable for FailingRowFinder {
    fn train(&mut self, _data: &Table) -> Result<(), TrainError> {
        Err(TrainError::MissingColumn("weight".into()))
    }

    fn is_trained(&self) -> bool {
        false
    }

    fn reset(&mut self) {}
}

/// What a [`RecordingColumnFinder`] saw
#[derive(Debug, Default)]
pub struct TrainingLog {
    /// Row count of every dataset it was trained on
    pub trained_row_counts: Vec<usize>,
    /// First column of every dataset it was trained on, as text
    pub trained_first_column: Vec<Vec<String>>,
    /// Row count of every dataset it was queried with
    pub queried_row_counts: Vec<usize>,
}

/// Column finder that records its training inputs and selects every column
pub struct RecordingColumnFinder {
    log: Arc<Mutex<TrainingLog>>,
    trained: bool,
    fail: bool,
}

impl RecordingColumnFinder {
    pub fn new() -> (Self, Arc<Mutex<TrainingLog>>) {
        Self::build(false)
    }

    /// Records like [`RecordingColumnFinder::new`] but refuses to train
    pub fn failing() -> (Self, Arc<Mutex<TrainingLog>>) {
        Self::build(true)
    }

    fn build(fail: bool) -> (Self, Arc<Mutex<TrainingLog>>) {
        let log = Arc::new(Mutex::new(TrainingLog::default()));
        let finder = Self {
            log: log.clone(),
            trained: false,
            fail,
        };
        (finder, log)
    }
}

impl Trainable for RecordingColumnFinder {
    fn train(&mut self, data: &Table) -> Result<(), TrainError> {
        let first_column = (0..data.row_count())
            .map(|row| data.value(row, 0))
            .collect::<Result<Vec<_>, _>>()?;

        let mut log = self.log.lock();
        log.trained_row_counts.push(data.row_count());
        log.trained_first_column.push(first_column);

        self.trained = !self.fail;
        if self.fail {
            Err(TrainError::NotNumeric("group".into()))
        } else {
            Ok(())
        }
    }

    fn is_trained(&self) -> bool {
        self.trained
    }

    fn reset(&mut self) {
        self.trained = false;
    }
}

impl ColumnFinder for RecordingColumnFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        if !self.trained {
            return Err(FinderError::NotTrained("RecordingColumnFinder"));
        }
        self.log.lock().queried_row_counts.push(data.row_count());
        Ok((0..data.column_count()).collect())
    }
}
