//! dbdoc CLI - document a MySQL schema as Markdown or a Graphviz diagram
//!
//! This is the main entry point for the `dbdoc` binary. Without a
//! destination it prints usage; otherwise it writes one documentation file
//! and exits with a code that identifies any failure.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use clap::CommandFactory;
use cli::Cli;
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::path::PathBuf;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let Some(dest) = cli.dest.clone() else {
        let _ = Cli::command().print_help();
        println!();
        process::exit(0);
    };

    match run(cli, dest) {
        Ok(()) => process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, kind = e.kind(), "Run failed");
            println!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, dest), fields(dest = %dest.display()))]
fn run(cli: Cli, dest: PathBuf) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut config = {
        let _config_timer = Timer::new("config_loading");
        tracing::info!("Loading configuration");
        Config::load_with_file(cli.config.as_deref())?
    };
    config.apply_cli(&cli);

    let mut output = OutputWriter::new(cli.use_color(), cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        graph = cli.graph,
        gitlab = cli.gitlab,
        "Generating documentation"
    );

    handlers::handle_generate(&cli, &dest, &config, &mut output)
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    logging_config.merge_with_env();

    // Quiet mode only reports errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["dbdoc", "-vv", "docs/db.md"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.dest, Some(PathBuf::from("docs/db.md")));

        let cli = Cli::parse_from(["dbdoc", "--quiet", "docs/db.md"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
