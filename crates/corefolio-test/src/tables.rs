//! Asset table fixtures.

use corefolio_core::{Column, Table, Universe};

/// One asset of a hand-built fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRow {
    pub id: i64,
    pub value: f64,
}

impl ValueRow {
    pub fn new(id: i64, value: f64) -> Self {
        Self { id, value }
    }
}

/// Builds an `ID` / `value` table from rows.
pub fn rows_table(rows: &[ValueRow]) -> Table {
    table(vec![
        Column::integer("ID", rows.iter().map(|r| r.id)),
        Column::float("value", rows.iter().map(|r| r.value)),
    ])
}

/// `ID = [1, 2, 3, 4]`, `value = [10, 20, 30, 40]`.
pub fn value_table() -> Table {
    rows_table(&[
        ValueRow::new(1, 10.0),
        ValueRow::new(2, 20.0),
        ValueRow::new(3, 30.0),
        ValueRow::new(4, 40.0),
    ])
}

/// [`value_table`] plus `sector = ["A", "A", "B", "B"]`.
pub fn categorical_table() -> Table {
    value_table()
        .with_column(Column::text("sector", ["A", "A", "B", "B"]))
        .unwrap_or_else(|e| panic!("invalid fixture: {}", e))
}

/// Six assets with numeric and categorical attributes.
///
/// `duration` averages 5.0. `region` has three assets in `eu`, two in `us`
/// and one in `apac`.
pub fn mixed_table() -> Table {
    table(vec![
        Column::integer("ID", [101, 102, 103, 104, 105, 106]),
        Column::float("value", [4.0, 7.0, 1.0, 9.0, 3.0, 6.0]),
        Column::float("duration", [2.0, 8.0, 5.0, 7.0, 3.0, 5.0]),
        Column::text("region", ["eu", "us", "eu", "apac", "us", "eu"]),
        Column::integer("rating", [3, 1, 2, 2, 3, 1]),
    ])
}

/// Universe over `table` keyed by `ID`.
pub fn universe(table: Table) -> Universe {
    Universe::from_table(table).unwrap_or_else(|e| panic!("invalid fixture: {}", e))
}

/// Universe over [`value_table`].
pub fn value_universe() -> Universe {
    universe(value_table())
}

fn table(columns: Vec<Column>) -> Table {
    Table::from_columns(columns).unwrap_or_else(|e| panic!("invalid fixture: {}", e))
}
