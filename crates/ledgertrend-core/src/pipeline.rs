//! Pipeline orchestration: extract, normalize, bucket, enrich, export.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bucketer::{daily_series, resample, DailyBuild};
use crate::domain::Granularity;
use crate::error::PipelineError;
use crate::export::{export, ExportReport, SeriesSink};
use crate::normalizer::{normalize, NormalizeReport};
use crate::source::{SalesSource, SourceColumns};

/// Per-granularity work order: which windows to compute and where the
/// enriched series lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranularityPlan {
    pub granularity: Granularity,
    pub windows: Vec<usize>,
    pub destination: String,
}

/// Full pipeline configuration. Plans run in list order, which fixes the
/// partial-completion state when a later granularity fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub source_table: String,
    pub columns: SourceColumns,
    pub plans: Vec<GranularityPlan>,
}

impl PipelineConfig {
    /// Validate everything needed before any extract work starts.
    ///
    /// Destination identifiers are deliberately not checked here: an empty
    /// destination fails at export time for that granularity, after earlier
    /// granularities have already been written.
    pub fn validate(&self) -> Result<(), PipelineError> {
        require_present("source_table", &self.source_table)?;
        require_present("date column", &self.columns.date)?;
        require_present("order_id column", &self.columns.order_id)?;
        require_present("amount column", &self.columns.amount)?;

        if self.plans.is_empty() {
            return Err(PipelineError::configuration(
                "at least one granularity plan is required",
            ));
        }

        let mut seen_granularities = HashSet::new();
        for plan in &self.plans {
            if !seen_granularities.insert(plan.granularity) {
                return Err(PipelineError::configuration(format!(
                    "granularity '{}' is configured more than once",
                    plan.granularity
                )));
            }

            let mut seen_windows = HashSet::new();
            for &window in &plan.windows {
                if window == 0 {
                    return Err(PipelineError::configuration(format!(
                        "window sizes for '{}' must be positive",
                        plan.granularity
                    )));
                }
                if !seen_windows.insert(window) {
                    return Err(PipelineError::configuration(format!(
                        "window {window} is listed twice for '{}'",
                        plan.granularity
                    )));
                }
            }
        }

        Ok(())
    }
}

fn require_present(name: &str, value: &str) -> Result<(), PipelineError> {
    if value.trim().is_empty() {
        return Err(PipelineError::configuration(format!("{name} is unset")));
    }
    Ok(())
}

/// Progress notifications emitted as the run advances. Injected as a sink so
/// the pipeline needs no ambient global state; a failed run's trail still
/// shows how many rows each stage touched.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    ExtractLoaded {
        rows: usize,
    },
    Normalized {
        report: NormalizeReport,
    },
    SeriesBucketed {
        granularity: Granularity,
        points: usize,
        zero_filled_days: usize,
    },
    IndicatorsComputed {
        granularity: Granularity,
        columns: usize,
    },
    Exported {
        granularity: Granularity,
        destination: &'a str,
        rows: usize,
    },
}

pub trait PipelineObserver {
    fn progress(&self, event: PipelineEvent<'_>);
}

/// Observer that discards every event.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn progress(&self, _event: PipelineEvent<'_>) {}
}

/// Counts accumulated over one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub source_rows: usize,
    pub normalize: NormalizeReport,
    pub zero_filled_days: usize,
    pub exports: Vec<ExportReport>,
}

pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    observer: &'a dyn PipelineObserver,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig, observer: &'a dyn PipelineObserver) -> Self {
        Self { config, observer }
    }

    /// Run the full pipeline: one source extract, one normalization pass,
    /// then bucket → enrich → export per configured plan, in plan order.
    ///
    /// Single-threaded and synchronous. A failure aborts the remaining
    /// plans, and exports already written for earlier granularities are NOT
    /// rolled back: there is deliberately no transactional guarantee across
    /// the per-granularity writes.
    pub fn run(
        &self,
        source: &dyn SalesSource,
        sink: &dyn SeriesSink,
    ) -> Result<RunReport, PipelineError> {
        self.config.validate()?;

        let raw = source.fetch(&self.config.source_table, &self.config.columns)?;
        self.observer
            .progress(PipelineEvent::ExtractLoaded { rows: raw.len() });

        let (clean, normalize_report) = normalize(&raw)?;
        self.observer.progress(PipelineEvent::Normalized {
            report: normalize_report,
        });

        let DailyBuild {
            series: daily,
            zero_filled_days,
        } = daily_series(&clean)?;
        self.observer.progress(PipelineEvent::SeriesBucketed {
            granularity: Granularity::Day,
            points: daily.points.len(),
            zero_filled_days,
        });

        let mut exports = Vec::with_capacity(self.config.plans.len());
        for plan in &self.config.plans {
            let series = resample(&daily, plan.granularity);
            if plan.granularity != Granularity::Day {
                self.observer.progress(PipelineEvent::SeriesBucketed {
                    granularity: plan.granularity,
                    points: series.points.len(),
                    zero_filled_days: 0,
                });
            }

            let table = crate::indicators::enrich(&series, &plan.windows);
            self.observer.progress(PipelineEvent::IndicatorsComputed {
                granularity: plan.granularity,
                columns: table.columns.len(),
            });

            let report = export(&table, &plan.destination, sink)?;
            self.observer.progress(PipelineEvent::Exported {
                granularity: plan.granularity,
                destination: &report.destination,
                rows: report.rows,
            });
            exports.push(report);
        }

        Ok(RunReport {
            source_rows: raw.len(),
            normalize: normalize_report,
            zero_filled_days,
            exports,
        })
    }
}
