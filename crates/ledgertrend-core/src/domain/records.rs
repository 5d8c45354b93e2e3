use serde::{Deserialize, Serialize};

use crate::domain::{Granularity, LedgerDate};

/// A row exactly as extracted from the source table. The date value stays
/// unparsed so that strict validation happens in the normalizer, not in SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSalesRecord {
    pub date_value: String,
    pub order_id: String,
    pub amount: f64,
}

/// A validated ledger record: parsed date, positive amount, and a
/// (date, order_id) pair unique within its batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub date: LedgerDate,
    pub order_id: String,
    pub amount: f64,
}

/// One bucket total in an aggregated series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: LedgerDate,
    pub total: f64,
}

/// A date-ascending aggregated series at one granularity. The daily series
/// is contiguous (step = one day, zero-filled); weekly and monthly series
/// are labeled by their bucket's period-end date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSeries {
    pub granularity: Granularity,
    pub points: Vec<SeriesPoint>,
}

impl SalesSeries {
    pub fn new(granularity: Granularity, points: Vec<SeriesPoint>) -> Self {
        Self {
            granularity,
            points,
        }
    }

    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.total).collect()
    }
}
