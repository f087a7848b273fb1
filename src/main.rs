use clap::Parser;
use dlsort::OrganizeError;
use dlsort::cli::{Args, run_cli_with_config};
use dlsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let target_dir = args.target_dir();

    match run_cli_with_config(&target_dir, args.config.as_deref(), args.quiet) {
        Ok(report) if report.is_complete_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e @ OrganizeError::MissingDirectory { .. }) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::from(2)
        }
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
