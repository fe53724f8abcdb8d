mod checker;
mod classifier;
mod config;
mod diagnostics;
mod error;
mod extractor;
mod report;
mod resolver;
mod types;
mod walker;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::report::Format;

/// Exit status for fatal errors, distinct from "links are broken" (1).
const EXIT_FATAL: u8 = 2;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "doclinks", version, about = "Check that local links in markdown docs resolve")]
struct Cli {
    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Also check documents under docs/**/archived paths.
    #[arg(long)]
    include_archived: bool,
    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Directory to check.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Log every missing link and skipped document to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    return match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(EXIT_FATAL)
        },
    };
}

/// Load config, check the tree, print the report.
///
/// # Errors
///
/// Returns errors from config loading, walking, document reads, or writing the report.
fn run(cli: &Cli) -> Result<ExitCode, error::Error> {
    let config = config::Config::load(&cli.root)?;
    let report = checker::check_links(&cli.root, &config, cli.include_archived)?;

    let mut stdout = std::io::stdout().lock();
    report.render(cli.format, &mut stdout)?;

    return Ok(report.exit_code());
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::new("warn")
    };

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: logging disabled: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_logging_init_is_reported_not_fatal() {
        init_logging(false, true);
        init_logging(true, false);
        tracing::debug!("still running after a rejected subscriber");
    }
}
