//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// dbdoc - document a MySQL schema as Markdown or a Graphviz diagram
///
/// Reads every table and column of a database and writes a Markdown file
/// (or a DOT graph with --graph) describing them.
#[derive(Parser, Debug)]
#[command(name = "dbdoc", version, author, about, long_about = None)]
pub struct Cli {
    /// Output file to generate, e.g. docs/db.md
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,

    /// Database host
    #[arg(long, env = "DBDOC_HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = "DBDOC_PORT")]
    pub port: Option<u16>,

    /// Database user
    #[arg(long, env = "DBDOC_USER")]
    pub user: Option<String>,

    /// Database (schema) name
    #[arg(long, env = "DBDOC_NAME")]
    pub name: Option<String>,

    /// Prompt for the database password
    #[arg(short = 'p', long)]
    pub password: bool,

    /// Overwrite DEST if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Fold column tables into collapsible <details> blocks
    #[arg(long)]
    pub gitlab: bool,

    /// Write a Graphviz digraph instead of Markdown (wins over --gitlab)
    #[arg(long)]
    pub graph: bool,

    /// Migration directory to read table comments from
    #[arg(long, value_name = "DIR")]
    pub migration: Option<PathBuf>,

    /// Document a saved schema snapshot instead of connecting
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Also save the introspected schema as a JSON snapshot
    #[arg(long, value_name = "FILE")]
    pub dump_snapshot: Option<PathBuf>,

    /// Enable verbose logging (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "DBDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
