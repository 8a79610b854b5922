//! # CLI Argument Definitions

use clap::{Parser, Subcommand, ValueEnum};
use gate::features::{duo::DuoProvider, totp::TotpProvider};
use std::net::IpAddr;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "gate-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Checks second-factor configuration without starting the gateway")]
pub struct Cli {
    /// Log resolved values and every policy decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every module's configuration and report problems
    Validate {
        /// Properties file; `GATE_*` environment variables override its values
        file: PathBuf,
        /// Only check these modules (all enabled modules by default)
        #[arg(short, long = "module", value_enum)]
        modules: Vec<Module>,
    },
    /// Decide whether a login from ADDRESS must complete a second factor
    Evaluate {
        /// Properties file; `GATE_*` environment variables override its values
        file: PathBuf,
        /// Client address of the login attempt
        address: IpAddr,
        #[arg(short, long, value_enum, default_value_t = Module::Totp)]
        module: Module,
    },
}

/// An authentication module with its own host lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Module {
    Totp,
    Duo,
}

impl Module {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Totp => TotpProvider::IDENTIFIER,
            Self::Duo => DuoProvider::IDENTIFIER,
        }
    }
}
