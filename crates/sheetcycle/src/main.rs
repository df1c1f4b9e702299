//! Sheetcycle CLI - find circular dependencies in spreadsheets.
//!
//! Reads every sheet of one or more workbooks, treats one column as the item
//! and another as what it depends on, and reports every dependency cycle with
//! the sheets its links came from.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::types::{OutputFormatArg, SeparatorArg};

/// Exit code used by `--fail-on-cycles` when a cycle was found.
const EXIT_CYCLES_FOUND: u8 = 2;

/// Sheetcycle: find circular dependencies in spreadsheet dependency listings.
#[derive(Parser)]
#[command(name = "sheetcycle")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan workbooks for cyclic dependencies
    Scan {
        /// Workbook files (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Column holding the item name (e.g. "Task")
        #[arg(short, long)]
        source: Option<String>,

        /// Column holding the dependencies (e.g. "Depends On")
        #[arg(short, long)]
        target: Option<String>,

        /// How several dependencies are separated inside one cell
        #[arg(short = 'p', long, value_enum)]
        separator: Option<SeparatorArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Text)]
        format: OutputFormatArg,

        /// Exit with status 2 when any cycle is found
        #[arg(long)]
        fail_on_cycles: bool,

        /// Config file (defaults to ./sheetcycle.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Never prompt; fail if a column is not given
        #[arg(long)]
        no_input: bool,
    },

    /// List the sheets and columns found in workbooks
    Columns {
        /// Workbook files (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Scan {
            files,
            source,
            target,
            separator,
            format,
            fail_on_cycles,
            config,
            no_input,
        } => cli::scan::run(&cli::scan::ScanArgs {
            files,
            source,
            target,
            separator: separator.map(Into::into),
            format,
            config,
            no_input,
        })
        .map(|found| {
            if found && fail_on_cycles {
                ExitCode::from(EXIT_CYCLES_FOUND)
            } else {
                ExitCode::SUCCESS
            }
        }),
        Commands::Columns { files } => cli::columns::run(&files).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
