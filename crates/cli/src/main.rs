use clap::Parser;
use lineleak_cli::args::Args;
use lineleak_cli::config::Config;
use lineleak_cli::error::Result;
use lineleak_cli::presentation;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from(args);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let report = lineleak_engine::run(config)?;
    presentation::print_report(&report, config);
    Ok(())
}
