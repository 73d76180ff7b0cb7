use clap::{Parser, Subcommand};
use lograke_core::cli;
use lograke_core::conf::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "lograke",
    version,
    about = "lograke: nginx access log latency reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the report for the newest access log (default)
    Run {
        /// Path to the config file (.json or .toml)
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Analyze one log file and print the ranked endpoints as JSON
    Analyze(cli::analyze::AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run { config }) => cli::run::run(&config),
        None => cli::run::run(&PathBuf::from(DEFAULT_CONFIG_PATH)),

        Some(Command::Analyze(args)) => cli::analyze::analyze(args).map(|_| ExitCode::SUCCESS),

        Some(Command::Config { cmd }) => cli::conf::run(cmd).map(|_| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("lograke error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
