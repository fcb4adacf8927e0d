use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use row_file_sort::cancellation::CancellationToken;
use row_file_sort::error::SortError;
use row_file_sort::generate::Generate;
use row_file_sort::progress::{ProgressReport, ProgressSink};
use row_file_sort::sort::Sort;

#[derive(Parser)]
#[command(name = "row-file-sort")]
#[command(about = "Sort huge 'Number. String' row files that do not fit in memory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort a row file in place
    Sort {
        /// Path to the file to sort
        path: PathBuf,
    },
    /// Generate a synthetic row file
    Gen {
        /// Number of rows to generate
        rows: usize,
        /// Path of the file to write
        path: PathBuf,
    },
    /// Check whether a row file is already sorted
    Check {
        /// Path to the file to check
        path: PathBuf,
    },
}

struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&self, report: ProgressReport) {
        print!("\r{}: {}%", report.operation(), report.percent());
        let _ = std::io::stdout().flush();
    }
}

fn main() -> Result<(), anyhow::Error> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;
    let cli = Cli::parse();
    let cancellation = CancellationToken::new();

    let result = match cli.command {
        Command::Sort { path } => Sort::new(path).sort(&ConsoleProgress, &cancellation),
        Command::Gen { rows, path } => {
            Generate::new(path, rows).generate(&ConsoleProgress, &cancellation)
        }
        Command::Check { path } => match Sort::new(path.clone()).check(&cancellation) {
            Ok(sorted) => {
                println!(
                    "{}: {}",
                    path.display(),
                    if sorted { "sorted" } else { "not sorted" }
                );
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => {
            println!();
            Ok(())
        }
        Err(SortError::Canceled) => {
            println!("\nThe operation was canceled.");
            Ok(())
        }
        Err(e) => Err(e).context("operation failed"),
    }
}
