use ledgertrend_core::RunReport;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(report: &RunReport, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &RunReport) {
    println!("source_rows         : {}", report.source_rows);
    println!(
        "dropped_non_positive: {}",
        report.normalize.dropped_non_positive
    );
    println!(
        "dropped_duplicates  : {}",
        report.normalize.dropped_duplicates
    );
    println!("zero_filled_days    : {}", report.zero_filled_days);
    println!("exports:");
    for export in &report.exports {
        println!(
            "  - {:5} -> {} ({} rows, {} columns)",
            export.granularity.as_str(),
            export.destination,
            export.rows,
            export.columns
        );
    }
}
