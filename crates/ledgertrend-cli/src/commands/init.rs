use std::fs;

use crate::cli::Cli;
use crate::config::FileConfig;
use crate::error::CliError;

/// Write a configuration template for the user to fill out. Refuses to
/// clobber an existing file.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.config.exists() {
        return Err(CliError::Configuration(format!(
            "'{}' already exists; remove it first to regenerate the template",
            cli.config.display()
        )));
    }

    let template = serde_json::to_string_pretty(&FileConfig::template())?;
    fs::write(&cli.config, template + "\n")?;
    println!(
        "configuration template written to '{}'; edit it and run `ledgertrend run`",
        cli.config.display()
    );
    Ok(())
}
