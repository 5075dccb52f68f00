use std::process::ExitCode;

use area_stats::cli::{self, Args};
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse();

    match cli::run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
