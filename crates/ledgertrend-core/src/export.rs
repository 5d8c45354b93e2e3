//! Series export: shape an indicator table into typed rows and hand it to
//! the upload collaborator.

use serde::Serialize;

use crate::domain::{Granularity, LedgerDate};
use crate::error::{PipelineError, UpstreamError};
use crate::indicators::IndicatorTable;
use crate::schema::TableSchema;

/// One flat output row. `values[0]` is the base sales total, followed by
/// one entry per indicator column in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: LedgerDate,
    pub values: Vec<Option<f64>>,
}

/// Confirmation returned by the upload collaborator once the write has
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReceipt {
    pub rows_written: usize,
}

/// Upload collaborator contract: a full-table replace write of the given
/// rows under the given schema. Blocks until the write completes or fails.
pub trait SeriesSink {
    fn upload(
        &self,
        destination: &str,
        schema: &TableSchema,
        rows: &[ExportRow],
    ) -> Result<UploadReceipt, UpstreamError>;
}

/// Outcome of one completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub granularity: Granularity,
    pub destination: String,
    pub rows: usize,
    pub columns: usize,
}

/// Declare the schema, shape the rows, and block on the sink's write. No
/// numeric work happens here.
pub fn export(
    table: &IndicatorTable,
    destination: &str,
    sink: &dyn SeriesSink,
) -> Result<ExportReport, PipelineError> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(PipelineError::configuration(format!(
            "destination table for the {} series is unset",
            table.granularity
        )));
    }

    let schema = TableSchema::for_table(table);
    let rows: Vec<ExportRow> = table
        .dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let mut values = Vec::with_capacity(table.columns.len() + 1);
            values.push(Some(table.sales[i]));
            for column in &table.columns {
                values.push(column.values[i]);
            }
            ExportRow { date, values }
        })
        .collect();

    let receipt = sink.upload(destination, &schema, &rows)?;

    Ok(ExportReport {
        granularity: table.granularity,
        destination: destination.to_owned(),
        rows: receipt.rows_written,
        columns: schema.columns.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{SalesSeries, SeriesPoint};
    use crate::indicators::enrich;

    struct RecordingSink {
        uploads: RefCell<Vec<(String, TableSchema, Vec<ExportRow>)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                uploads: RefCell::new(Vec::new()),
            }
        }
    }

    impl SeriesSink for RecordingSink {
        fn upload(
            &self,
            destination: &str,
            schema: &TableSchema,
            rows: &[ExportRow],
        ) -> Result<UploadReceipt, UpstreamError> {
            self.uploads
                .borrow_mut()
                .push((destination.to_owned(), schema.clone(), rows.to_vec()));
            Ok(UploadReceipt {
                rows_written: rows.len(),
            })
        }
    }

    fn table() -> IndicatorTable {
        let mut date = LedgerDate::parse("2024-01-01").expect("date");
        let mut points = Vec::new();
        for total in [10.0, 20.0, 30.0] {
            points.push(SeriesPoint { date, total });
            date = date.next_day().expect("next day");
        }
        enrich(&SalesSeries::new(Granularity::Day, points), &[2])
    }

    #[test]
    fn empty_destination_is_a_configuration_error() {
        let sink = RecordingSink::new();
        let error = export(&table(), "  ", &sink).expect_err("must fail");
        assert!(matches!(error, PipelineError::Configuration { .. }));
        assert!(sink.uploads.borrow().is_empty());
    }

    #[test]
    fn rows_carry_base_total_then_indicator_values() {
        let sink = RecordingSink::new();
        let report = export(&table(), "sales_day", &sink).expect("export");

        assert_eq!(report.rows, 3);
        assert_eq!(report.columns, 5);

        let uploads = sink.uploads.borrow();
        let (destination, schema, rows) = &uploads[0];
        assert_eq!(destination, "sales_day");
        assert_eq!(schema.columns.len(), 5);
        // First row: sales total present, SMA/WMA null prefix, EMA seeded.
        assert_eq!(rows[0].values[0], Some(10.0));
        assert_eq!(rows[0].values[1], None);
        assert_eq!(rows[0].values[2], None);
        assert_eq!(rows[0].values[3], Some(10.0));
    }

    #[test]
    fn sink_failures_propagate_as_upstream_errors() {
        struct FailingSink;
        impl SeriesSink for FailingSink {
            fn upload(
                &self,
                _destination: &str,
                _schema: &TableSchema,
                _rows: &[ExportRow],
            ) -> Result<UploadReceipt, UpstreamError> {
                Err(UpstreamError::new("disk full"))
            }
        }

        let error = export(&table(), "sales_day", &FailingSink).expect_err("must fail");
        assert!(matches!(error, PipelineError::Upstream(_)));
    }
}
