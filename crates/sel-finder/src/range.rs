//! Finders driven by a range expression

use serde::{Deserialize, Serialize};

use sel_range::{ParseError, RangeSpec};

use crate::{ColumnFinder, FinderError, RowFinder, Table};

/// Selects rows by position or row name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeRowFinder {
    pub range: RangeSpec,
}

impl RangeRowFinder {
    pub fn new(range: RangeSpec) -> Self {
        Self { range }
    }

    /// Parse `text` as the row range
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Default for RangeRowFinder {
    fn default() -> Self {
        Self::new(RangeSpec::all())
    }
}

impl RowFinder for RangeRowFinder {
    fn find_rows(&self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let rows = self.range.evaluate(&data.row_domain())?;
        tracing::debug!(range = %self.range, rows = rows.len(), "found rows by range");
        Ok(rows)
    }
}

/// Selects columns by position or column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeColumnFinder {
    pub range: RangeSpec,
}

impl RangeColumnFinder {
    pub fn new(range: RangeSpec) -> Self {
        Self { range }
    }

    /// Parse `text` as the column range
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Default for RangeColumnFinder {
    fn default() -> Self {
        Self::new(RangeSpec::all())
    }
}

impl ColumnFinder for RangeColumnFinder {
    fn find_columns(&mut self, data: &Table) -> Result<Vec<usize>, FinderError> {
        let columns = self.range.evaluate(&data.column_domain())?;
        tracing::debug!(range = %self.range, columns = columns.len(), "found columns by range");
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::numbers_table;
    use sel_range::ResolveError;

    #[test]
    fn test_rows_by_position_and_name() {
        let table = numbers_table();
        assert_eq!(
            RangeRowFinder::parse("1,3,5").unwrap().find_rows(&table).unwrap(),
            vec![0, 2, 4]
        );
        assert_eq!(
            RangeRowFinder::parse("R4-last").unwrap().find_rows(&table).unwrap(),
            vec![3, 4]
        );
        assert_eq!(
            RangeRowFinder::default().find_rows(&table).unwrap(),
            vec![0, 1, 2, 3, 4]
        );
        assert!(matches!(
            RangeRowFinder::parse("7").unwrap().find_rows(&table),
            Err(FinderError::Range(ResolveError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_columns_by_name() {
        let table = numbers_table();
        let mut finder = RangeColumnFinder::parse("GROUP,id").unwrap();
        assert_eq!(finder.find_columns(&table).unwrap(), vec![2, 0]);

        let mut inverted = RangeColumnFinder::parse("inv(value)").unwrap();
        assert_eq!(inverted.find_columns(&table).unwrap(), vec![0, 2]);

        let mut missing = RangeColumnFinder::parse("weight").unwrap();
        assert!(matches!(
            missing.find_columns(&table),
            Err(FinderError::Range(ResolveError::UnknownName(name))) if name == "weight"
        ));
    }

    #[test]
    fn test_config_round_trip() {
        let finder = RangeColumnFinder::parse("first-2,\"a-b\"").unwrap();
        let json = serde_json::to_string(&finder).unwrap();
        assert_eq!(json, r#"{"range":"first-2,\"a-b\""}"#);
        assert_eq!(serde_json::from_str::<RangeColumnFinder>(&json).unwrap(), finder);

        let defaulted: RangeRowFinder = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, RangeRowFinder::default());
    }
}
