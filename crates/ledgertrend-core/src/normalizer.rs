//! Record normalization: date coercion, amount filtering, deduplication.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{CleanRecord, LedgerDate, RawSalesRecord};
use crate::error::PipelineError;

/// Row counts for each drop stage, reported for run diagnosis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub input_rows: usize,
    pub dropped_non_positive: usize,
    pub dropped_duplicates: usize,
}

/// Coerce raw rows into validated [`CleanRecord`]s.
///
/// Date parsing runs first and is strict: one unparseable date fails the
/// whole batch, because downstream bucketing assumes every date is valid.
/// Rows with non-positive (or non-finite) amounts are then dropped, and the
/// remainder is deduplicated by (date, order_id), first row in input order
/// wins. Running this twice over already-clean input is a no-op.
pub fn normalize(
    rows: &[RawSalesRecord],
) -> Result<(Vec<CleanRecord>, NormalizeReport), PipelineError> {
    let mut parsed = Vec::with_capacity(rows.len());
    for (row, record) in rows.iter().enumerate() {
        let date = LedgerDate::parse(&record.date_value).map_err(|error| {
            PipelineError::DataQuality {
                value: error.value,
                row,
            }
        })?;
        parsed.push((date, record));
    }

    let mut report = NormalizeReport {
        input_rows: rows.len(),
        ..NormalizeReport::default()
    };
    let mut seen: HashSet<(LedgerDate, &str)> = HashSet::with_capacity(parsed.len());
    let mut clean = Vec::with_capacity(parsed.len());

    for (date, record) in parsed {
        if !record.amount.is_finite() || record.amount <= 0.0 {
            report.dropped_non_positive += 1;
            continue;
        }
        if !seen.insert((date, record.order_id.as_str())) {
            report.dropped_duplicates += 1;
            continue;
        }
        clean.push(CleanRecord {
            date,
            order_id: record.order_id.clone(),
            amount: record.amount,
        });
    }

    Ok((clean, report))
}
