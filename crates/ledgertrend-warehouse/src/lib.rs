//! # Ledgertrend Warehouse
//!
//! DuckDB-backed implementation of the pipeline's two external
//! collaborators: the source extract query and the destination upload.
//!
//! The extract returns the date column cast to text so that strict date
//! validation stays in the core pipeline instead of being hidden inside
//! SQL casts. The upload performs a full-table replace from the typed
//! schema descriptor (DATE for the date column, DOUBLE for everything
//! else) with every row value bound as a query parameter, and records one
//! audit row per completed write in `upload_log`.
//!
//! Table and column names come from configuration, so they are validated
//! against a strict identifier grammar and quoted before they reach any
//! SQL text; row values are never interpolated.

pub mod duckdb;
mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{Connection, ToSql};
use thiserror::Error;

use ledgertrend_core::{
    ColumnType, ExportRow, RawSalesRecord, SalesSource, SeriesSink, SourceColumns, TableSchema,
    UploadReceipt, UpstreamError,
};

pub use duckdb::{AccessMode, ConnectionManager, PooledConnection};

/// Errors that can occur during warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configured table or column name failed identifier validation.
    #[error("invalid identifier '{value}'")]
    InvalidIdentifier { value: String },
}

/// Configuration for the warehouse database.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections to keep.
    pub max_pool_size: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            db_path: resolve_home().join("warehouse.duckdb"),
            max_pool_size: 2,
        }
    }
}

/// Both collaborator endpoints over one local DuckDB file.
#[derive(Clone)]
pub struct Warehouse {
    manager: ConnectionManager,
    run_id: String,
}

impl Warehouse {
    pub fn open_default() -> Result<Self, WarehouseError> {
        Self::open(WarehouseConfig::default())
    }

    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = ConnectionManager::new(config.db_path, config.max_pool_size);
        let warehouse = Self {
            manager,
            run_id: String::from("local"),
        };
        warehouse.initialize()?;
        Ok(warehouse)
    }

    /// Tag subsequent uploads with a caller-supplied run identifier in the
    /// audit log.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }

    fn initialize(&self) -> Result<(), WarehouseError> {
        let connection = self.manager.acquire(AccessMode::ReadWrite)?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    /// Full extract of the sales ledger: one row per source row, with the
    /// date and order id as text and the amount as a double. A NULL amount
    /// comes back as NaN so the normalizer counts it among the dropped
    /// non-positive rows.
    pub fn fetch_sales(
        &self,
        table: &str,
        columns: &SourceColumns,
    ) -> Result<Vec<RawSalesRecord>, WarehouseError> {
        let sql = format!(
            "SELECT CAST({date} AS VARCHAR), CAST({order_id} AS VARCHAR), CAST({amount} AS DOUBLE) FROM {table}",
            date = quote_identifier(&columns.date)?,
            order_id = quote_identifier(&columns.order_id)?,
            amount = quote_identifier(&columns.amount)?,
            table = quote_qualified(table)?,
        );

        let connection = self.manager.acquire(AccessMode::ReadOnly)?;
        let mut statement = connection.prepare(sql.as_str())?;
        let rows = statement.query_map([], |row| {
            let date_value: Option<String> = row.get(0)?;
            let order_id: Option<String> = row.get(1)?;
            let amount: Option<f64> = row.get(2)?;
            Ok(RawSalesRecord {
                date_value: date_value.unwrap_or_default(),
                order_id: order_id.unwrap_or_default(),
                amount: amount.unwrap_or(f64::NAN),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Replace the destination table with the given rows under the typed
    /// schema. The DDL and every insert run inside one transaction, so a
    /// failed write leaves the previous table contents untouched; on commit
    /// an `ok` audit row is appended to `upload_log`.
    pub fn upload_series(
        &self,
        destination: &str,
        schema: &TableSchema,
        rows: &[ExportRow],
    ) -> Result<usize, WarehouseError> {
        let table = quote_qualified(destination)?;
        let mut column_defs = Vec::with_capacity(schema.columns.len());
        let mut column_names = Vec::with_capacity(schema.columns.len());
        let mut placeholders = Vec::with_capacity(schema.columns.len());
        for spec in &schema.columns {
            let name = quote_identifier(&spec.name)?;
            column_defs.push(format!("{name} {}", sql_type(spec.column_type)));
            column_names.push(name);
            placeholders.push(match spec.column_type {
                ColumnType::Date => "TRY_CAST(? AS DATE)",
                ColumnType::Float64 => "?",
            });
        }

        let connection = self.manager.acquire(AccessMode::ReadWrite)?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize, WarehouseError> {
            connection.execute_batch(
                format!(
                    "CREATE OR REPLACE TABLE {table} ({})",
                    column_defs.join(", ")
                )
                .as_str(),
            )?;

            let insert = format!(
                "INSERT INTO {table} ({}) VALUES ({})",
                column_names.join(", "),
                placeholders.join(", ")
            );
            let mut statement = connection.prepare(insert.as_str())?;
            for row in rows {
                let date_text = row.date.format_iso();
                let mut params: Vec<&dyn ToSql> = Vec::with_capacity(row.values.len() + 1);
                params.push(&date_text);
                for value in &row.values {
                    params.push(value);
                }
                statement.execute(params.as_slice())?;
            }

            let row_count = rows.len() as i64;
            let params: [&dyn ToSql; 3] = [&self.run_id, &destination, &row_count];
            connection.execute(
                "INSERT INTO upload_log (run_id, destination, row_count, status) \
                 VALUES (?, ?, ?, 'ok')",
                params.as_slice(),
            )?;

            Ok(rows.len())
        })();

        finalize_transaction(&connection, result)
    }
}

impl SalesSource for Warehouse {
    fn fetch(
        &self,
        table: &str,
        columns: &SourceColumns,
    ) -> Result<Vec<RawSalesRecord>, UpstreamError> {
        self.fetch_sales(table, columns)
            .map_err(|error| UpstreamError::new(format!("source query failed: {error}")))
    }
}

impl SeriesSink for Warehouse {
    fn upload(
        &self,
        destination: &str,
        schema: &TableSchema,
        rows: &[ExportRow],
    ) -> Result<UploadReceipt, UpstreamError> {
        self.upload_series(destination, schema, rows)
            .map(|rows_written| UploadReceipt { rows_written })
            .map_err(|error| {
                UpstreamError::new(format!("upload to '{destination}' failed: {error}"))
            })
    }
}

/// Commit on success, roll back on failure.
fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, WarehouseError>,
) -> Result<T, WarehouseError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn sql_type(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Date => "DATE",
        ColumnType::Float64 => "DOUBLE",
    }
}

/// Validate a single identifier: ASCII letter or underscore first, then
/// letters, digits, and underscores.
fn validate_identifier(value: &str) -> Result<&str, WarehouseError> {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    let valid = matches!(chars.next(), Some(first) if first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if !valid {
        return Err(WarehouseError::InvalidIdentifier {
            value: value.to_owned(),
        });
    }
    Ok(trimmed)
}

fn quote_identifier(value: &str) -> Result<String, WarehouseError> {
    Ok(format!("\"{}\"", validate_identifier(value)?))
}

/// Quote a possibly schema-qualified table name, validating each dotted
/// part separately.
fn quote_qualified(value: &str) -> Result<String, WarehouseError> {
    let parts: Vec<String> = value
        .trim()
        .split('.')
        .map(quote_identifier)
        .collect::<Result<_, _>>()?;
    Ok(parts.join("."))
}

fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os("LEDGERTREND_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".ledgertrend");
    }

    PathBuf::from(".ledgertrend")
}
