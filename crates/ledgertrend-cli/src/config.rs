//! Configuration file handling.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ledgertrend_core::{GranularityPlan, Granularity, PipelineConfig, SourceColumns};

use crate::error::CliError;

/// On-disk configuration. One destination table and one windows list per
/// granularity, plus the source table and its column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Warehouse database file; defaults to the warehouse crate's resolution
    /// when absent, and `run --db` overrides both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    pub source_table: String,
    pub date_column: String,
    #[serde(default = "default_order_column")]
    pub order_column: String,
    pub amount_column: String,
    pub destination_table_day: String,
    pub destination_table_week: String,
    pub destination_table_month: String,
    pub windows_day: Vec<usize>,
    pub windows_week: Vec<usize>,
    pub windows_month: Vec<usize>,
}

fn default_order_column() -> String {
    String::from("order_id")
}

impl FileConfig {
    pub fn template() -> Self {
        Self {
            database_path: Some(PathBuf::from("ledgertrend.duckdb")),
            source_table: String::from("raw_sales"),
            date_column: String::from("date"),
            order_column: default_order_column(),
            amount_column: String::from("sales"),
            destination_table_day: String::from("sales_day"),
            destination_table_week: String::from("sales_week"),
            destination_table_month: String::from("sales_month"),
            windows_day: vec![7, 21, 30, 50, 100, 200],
            windows_week: vec![1, 2, 3, 4, 5, 10, 20],
            windows_month: vec![1, 2, 3, 6, 12, 24],
        }
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path).map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                CliError::Configuration(format!(
                    "configuration file '{}' not found; run `ledgertrend init` to create a template",
                    path.display()
                ))
            } else {
                CliError::Io(error)
            }
        })?;

        serde_json::from_str(&content).map_err(|error| {
            CliError::Configuration(format!(
                "configuration file '{}' is invalid: {error}",
                path.display()
            ))
        })
    }

    /// Granularity plans in day, week, month order, which is the order
    /// exports run in and fixes partial-completion state on failure.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            source_table: self.source_table.clone(),
            columns: SourceColumns {
                date: self.date_column.clone(),
                order_id: self.order_column.clone(),
                amount: self.amount_column.clone(),
            },
            plans: vec![
                GranularityPlan {
                    granularity: Granularity::Day,
                    windows: self.windows_day.clone(),
                    destination: self.destination_table_day.clone(),
                },
                GranularityPlan {
                    granularity: Granularity::Week,
                    windows: self.windows_week.clone(),
                    destination: self.destination_table_week.clone(),
                },
                GranularityPlan {
                    granularity: Granularity::Month,
                    windows: self.windows_month.clone(),
                    destination: self.destination_table_month.clone(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_round_trips_and_validates() {
        let template = FileConfig::template();
        let json = serde_json::to_string_pretty(&template).expect("serialize");
        let parsed: FileConfig = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, template);
        parsed.to_pipeline_config().validate().expect("valid");
    }

    #[test]
    fn order_column_defaults_when_absent() {
        let json = r#"{
            "source_table": "raw_sales",
            "date_column": "sold_at",
            "amount_column": "amount",
            "destination_table_day": "d",
            "destination_table_week": "w",
            "destination_table_month": "m",
            "windows_day": [7],
            "windows_week": [4],
            "windows_month": [3]
        }"#;
        let parsed: FileConfig = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.order_column, "order_id");
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let error = FileConfig::load(Path::new("/nonexistent/ledgertrend.json"))
            .expect_err("must fail");
        assert!(matches!(error, CliError::Configuration(_)));
    }
}
