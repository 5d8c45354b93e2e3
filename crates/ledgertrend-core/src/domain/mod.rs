mod date;
mod granularity;
mod records;

pub use date::{DateParseError, LedgerDate};
pub use granularity::Granularity;
pub use records::{CleanRecord, RawSalesRecord, SalesSeries, SeriesPoint};
