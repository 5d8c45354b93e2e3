mod init;
mod run;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Init => init::run(cli),
        Command::Run(args) => run::run(cli, args),
    }
}
