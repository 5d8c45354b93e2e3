//! Core contracts for ledgertrend.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The record normalizer, calendar bucketer, and moving-average engine
//! - The series exporter and its typed schema descriptor
//! - Collaborator traits for the source extract and destination upload
//! - Pipeline orchestration and structured errors

pub mod bucketer;
pub mod domain;
pub mod error;
pub mod export;
pub mod indicators;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
pub mod source;

pub use bucketer::{daily_series, resample, DailyBuild};
pub use domain::{CleanRecord, Granularity, LedgerDate, RawSalesRecord, SalesSeries, SeriesPoint};
pub use error::{PipelineError, UpstreamError};
pub use export::{export, ExportReport, ExportRow, SeriesSink, UploadReceipt};
pub use indicators::{
    column_name, ema, enrich, sma, wma, IndicatorColumn, IndicatorTable, MovingStat,
};
pub use normalizer::{normalize, NormalizeReport};
pub use pipeline::{
    GranularityPlan, NoopObserver, Pipeline, PipelineConfig, PipelineEvent, PipelineObserver,
    RunReport,
};
pub use schema::{ColumnSpec, ColumnType, TableSchema};
pub use source::{SalesSource, SourceColumns};
