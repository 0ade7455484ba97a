use crate::options::OutputFormat;
use crate::parsers::parse_positive_usize;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lineleak",
    version,
    about = "Counts the logical and physical lines of a script, and yells if a set limit is exceeded."
)]
pub struct Args {
    /// The name of the file to lint.
    pub filename: PathBuf,

    /// Sets the line limit.
    #[arg(
        short = 'l',
        long,
        default_value_t = lineleak_engine::config::DEFAULT_LIMIT,
        value_parser = parse_positive_usize
    )]
    pub limit: usize,

    /// Overrides limit enforcement, and returns just the number of lines in
    /// the script.
    #[arg(short = 's', long)]
    pub silence: bool,

    /// Enforces the limit on physical lines instead of logical lines. It is
    /// only useful if the limit is enforced.
    #[arg(short = 'p', long)]
    pub physical: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
