use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sqldoc_cli::{run, Command, Context};

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Translate SQL statements into document-database plans")]
pub struct CliArgs {
    /// The directory holding the configuration.
    #[arg(
        long = "configuration",
        env = "SQLDOC_CONFIGURATION_DIRECTORY",
        value_name = "DIRECTORY",
        default_value = "."
    )]
    pub configuration_dir: PathBuf,
    /// The command to invoke.
    #[command(subcommand)]
    pub command: Command,
}

pub fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    let context = Context {
        context_path: args.configuration_dir,
        input: std::io::stdin().lock(),
        output: std::io::stdout().lock(),
    };
    match run(args.command, context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
