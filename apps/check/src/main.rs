pub mod args;
pub mod handlers;

use crate::args::{Cli, Command};
use clap::Parser;
use gate_logger::{ConsoleTarget, LogFormat, Logger};
use tracing::error;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::builder(env!("CARGO_PKG_NAME"))
        .verbose(cli.verbose)
        .format(if cli.json { LogFormat::Json } else { LogFormat::Compact })
        .console(ConsoleTarget::Stdout)
        .init()?;

    let result = match cli.command {
        Command::Validate { file, modules } => handlers::validate::run(&file, &modules),
        Command::Evaluate { file, address, module } => {
            handlers::evaluate::run(&file, address, module).map(|_| ())
        },
    };

    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}
