//! Progress reporting for interactive runs.

use ledgertrend_core::{PipelineEvent, PipelineObserver};

/// Prints one line per pipeline stage to stderr, leaving stdout free for
/// the machine-readable report.
pub struct StderrObserver;

impl PipelineObserver for StderrObserver {
    fn progress(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::ExtractLoaded { rows } => {
                eprintln!("loaded {rows} rows from source");
            }
            PipelineEvent::Normalized { report } => {
                eprintln!(
                    "normalized {} rows ({} non-positive dropped, {} duplicates dropped)",
                    report.input_rows, report.dropped_non_positive, report.dropped_duplicates
                );
            }
            PipelineEvent::SeriesBucketed {
                granularity,
                points,
                zero_filled_days,
            } => {
                if zero_filled_days > 0 {
                    eprintln!(
                        "bucketed {points} {granularity} points ({zero_filled_days} days zero-filled)"
                    );
                } else {
                    eprintln!("bucketed {points} {granularity} points");
                }
            }
            PipelineEvent::IndicatorsComputed {
                granularity,
                columns,
            } => {
                eprintln!("computed {columns} indicator columns for the {granularity} series");
            }
            PipelineEvent::Exported {
                granularity,
                destination,
                rows,
            } => {
                eprintln!("exported {rows} {granularity} rows to {destination}");
            }
        }
    }
}
