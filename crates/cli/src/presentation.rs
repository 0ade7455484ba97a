// crates/cli/src/presentation.rs
use crate::config::Config;
use lineleak_engine::options::{LimitPolicy, OutputFormat};
use lineleak_engine::stats::FileReport;

const WITHIN_LIMIT: &str = "NUMBER OF LINES WITHIN LIMIT.";

pub fn print_report(report: &FileReport, config: &Config) {
    match config.format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => print_text(report, config),
    }
}

fn print_text(report: &FileReport, config: &Config) {
    match config.limit_policy {
        LimitPolicy::Ignore => print_summary(report),
        LimitPolicy::Enforce => {
            if let Some(leak_line) = report.leak_line {
                print_limit_warning(report, config, leak_line);
            } else if report.has_live_code() {
                print!("{WITHIN_LIMIT}");
                print_summary(report);
            } else {
                eprintln!("\n\t| {} has no live code.", report.path.display());
            }
        }
    }
}

fn print_summary(report: &FileReport) {
    println!(
        "\n\t{} has: \n\t{} physical lines \n\t{} logical lines.",
        report.path.display(),
        report.physical_lines,
        report.logical_lines
    );
}

fn print_limit_warning(report: &FileReport, config: &Config, leak_line: usize) {
    let mode = config.mode;
    eprintln!(
        "\n\t| {}-LINE {} LIMIT EXCEEDED!\n\t| {} has {} {} lines.\n\t| Limit was exceeded at line [{}].",
        config.limit,
        mode.to_string().to_uppercase(),
        report.path.display(),
        report.count_for(mode),
        mode,
        leak_line
    );
}

fn print_json(report: &FileReport) {
    if let Ok(json) = serde_json::to_string_pretty(report) {
        println!("{json}");
    }
}
