//! Source extract contract.

use serde::{Deserialize, Serialize};

use crate::domain::RawSalesRecord;
use crate::error::UpstreamError;

/// Column names of the source ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColumns {
    pub date: String,
    pub order_id: String,
    pub amount: String,
}

/// Opaque synchronous fetch of the full source extract. No pagination or
/// streaming contract is defined; each run reads the entire table.
pub trait SalesSource {
    fn fetch(
        &self,
        table: &str,
        columns: &SourceColumns,
    ) -> Result<Vec<RawSalesRecord>, UpstreamError>;
}
