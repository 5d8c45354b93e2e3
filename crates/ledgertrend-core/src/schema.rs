//! Typed schema descriptor handed to the upload collaborator.
//!
//! The schema is built deterministically from the indicator table, never
//! from runtime column introspection: the date column is a calendar-date
//! type and every other column is a 64-bit float.

use serde::Serialize;

use crate::indicators::IndicatorTable;

/// Column types the upload contract recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Date,
    Float64,
}

/// One (name, type) pair in a destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered column layout of a destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// `date DATE, sales FLOAT64`, then one FLOAT64 column per indicator, in
    /// table order.
    pub fn for_table(table: &IndicatorTable) -> Self {
        let mut columns = Vec::with_capacity(table.columns.len() + 2);
        columns.push(ColumnSpec {
            name: String::from("date"),
            column_type: ColumnType::Date,
        });
        columns.push(ColumnSpec {
            name: String::from("sales"),
            column_type: ColumnType::Float64,
        });
        for indicator in &table.columns {
            columns.push(ColumnSpec {
                name: indicator.name.clone(),
                column_type: ColumnType::Float64,
            });
        }
        Self { columns }
    }
}
