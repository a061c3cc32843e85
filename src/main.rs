mod commands;
mod config;
mod diagnostics;
mod discovery;
mod document;
mod error;
mod logging;
mod report;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use crate::report::Format;

#[derive(Parser)]
#[command(
    name = "unresolved",
    version,
    about = "Find bare `{Name: ...}` references left under Columns/Parameters in JSON documents"
)]
struct Cli {
    /// Subcommand; `scan` with defaults when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Increase log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the documents a scan would read, marking any it would skip
    Files {
        /// Directory to walk instead of the configured root.
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Report every unresolved reference, then the total
    Scan {
        /// Report format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Directory to walk instead of the configured root.
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Scan {
        format: Format::Text,
        root: None,
    });

    let result = match command {
        Commands::Files { root } => commands::files(root),
        Commands::Scan { format, root } => commands::scan(root, format),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
        Ok(code) => code,
    };
}
