//! Range name sources over a table's columns and rows

use sel_range::NameSource;

use crate::Table;

/// Column names of a table, resolved through the table's lookup map
#[derive(Debug, Clone, Copy)]
pub struct ColumnNames<'a> {
    table: &'a Table,
}

impl<'a> ColumnNames<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl NameSource for ColumnNames<'_> {
    fn size(&self) -> usize {
        self.table.column_count()
    }

    fn name_at(&self, index: usize) -> Option<&str> {
        self.table.column_name(index)
    }

    fn position_of(&self, name: &str, exact: bool) -> Option<usize> {
        if exact {
            (0..self.size()).find(|&index| self.name_at(index) == Some(name))
        } else {
            self.table.column_index(name)
        }
    }
}

/// Row names of a table; rows without names only resolve by position
#[derive(Debug, Clone, Copy)]
pub struct RowNames<'a> {
    table: &'a Table,
}

impl<'a> RowNames<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl NameSource for RowNames<'_> {
    fn size(&self) -> usize {
        self.table.row_count()
    }

    fn name_at(&self, index: usize) -> Option<&str> {
        self.table.row_name(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int32Array};
    use sel_range::{RangeSpec, ResolveError};

    fn table() -> Table {
        let column = || Arc::new(Int32Array::from(vec![1, 2, 3])) as ArrayRef;
        Table::try_from_columns([
            ("Alpha", column()),
            ("beta", column()),
            ("ALPHA", column()),
            ("a-b", column()),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_ranges() {
        let table = table();
        let eval = |text: &str| RangeSpec::parse(text).unwrap().evaluate(&table.column_domain());

        assert_eq!(eval("alpha").unwrap(), vec![0]);
        assert_eq!(eval("\"ALPHA\"").unwrap(), vec![2]);
        assert_eq!(eval("\"a-b\",BETA").unwrap(), vec![3, 1]);
        assert_eq!(eval("inv(first)").unwrap(), vec![1, 2, 3]);
        assert_eq!(eval("gamma"), Err(ResolveError::UnknownName("gamma".into())));
    }

    #[test]
    fn test_row_ranges() {
        let table = table();
        let rows = |table: &Table, text: &str| RangeSpec::parse(text).unwrap().evaluate(&table.row_domain());

        assert_eq!(rows(&table, "last,1").unwrap(), vec![2, 0]);
        assert!(matches!(rows(&table, "r2"), Err(ResolveError::UnknownName(_))));

        let named = table
            .with_row_names(vec!["r1".into(), "r2".into(), "r3".into()])
            .unwrap();
        assert_eq!(rows(&named, "R2-last").unwrap(), vec![1, 2]);
    }
}
