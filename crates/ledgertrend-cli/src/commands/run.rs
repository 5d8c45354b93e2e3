use uuid::Uuid;

use ledgertrend_core::{NoopObserver, Pipeline, PipelineObserver};
use ledgertrend_warehouse::{Warehouse, WarehouseConfig};

use crate::cli::{Cli, RunArgs};
use crate::config::FileConfig;
use crate::error::CliError;
use crate::observer::StderrObserver;
use crate::output;

pub fn run(cli: &Cli, args: &RunArgs) -> Result<(), CliError> {
    let file_config = FileConfig::load(&cli.config)?;
    let pipeline_config = file_config.to_pipeline_config();
    pipeline_config.validate()?;

    let db_path = args
        .db
        .clone()
        .or_else(|| file_config.database_path.clone());
    let warehouse = match db_path {
        Some(db_path) => Warehouse::open(WarehouseConfig {
            db_path,
            ..WarehouseConfig::default()
        })?,
        None => Warehouse::open_default()?,
    }
    .with_run_id(Uuid::new_v4().to_string());

    let observer: Box<dyn PipelineObserver> = if cli.quiet {
        Box::new(NoopObserver)
    } else {
        Box::new(StderrObserver)
    };

    let pipeline = Pipeline::new(&pipeline_config, observer.as_ref());
    let report = pipeline.run(&warehouse, &warehouse)?;

    output::render(&report, cli.format, cli.pretty)
}
