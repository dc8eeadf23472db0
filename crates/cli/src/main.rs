use check_format_cli::args::Args;
use check_format_cli::config::Config;
use check_format_cli::error::AppError;
use check_format_cli::{logging, presentation};
use check_format_engine::notifier::LogNotifier;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.loglevel) {
        eprintln!("Warning: {e}");
    }

    let config = Config::from(&args);

    match check_format_engine::run_with_nkf(&config, &LogNotifier) {
        Ok(report) => {
            if let Err(e) = presentation::print_report(&report, args.format) {
                eprintln!("Output Error: {e}");
                return e.exit_code();
            }
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("Application Error: {e}");
            e.exit_code()
        }
    }
}
