//! Documentation generation handler
//!
//! Wires the command line, the configuration and the core library together:
//! comment overrides, schema provider, snapshot dump and the final write.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use dbdoc_core::{
    CommentOverrides, CommentSource, DocumentAssembler, OutputMode, SchemaProvider,
    SchemaSnapshot, SnapshotProvider,
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Generate the documentation file at `dest`
#[instrument(skip(cli, config, output), fields(dest = %dest.display(), graph = cli.graph))]
pub fn handle_generate(
    cli: &Cli,
    dest: &Path,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("generate", &dest.display().to_string());

    // Refuse before prompting for a password or touching the database
    if !cli.force && dest.exists() {
        return Err(dbdoc_core::Error::DestinationExists {
            path: dest.to_path_buf(),
        }
        .into());
    }

    let overrides = match &cli.migration {
        Some(dir) => {
            output.info(&format!("Reading table comments from {}", dir.display()))?;
            load_overrides(config, dir)?
        }
        None => CommentOverrides::new(),
    };

    let mut provider = open_provider(cli, config, output)?;

    if let Some(path) = &cli.dump_snapshot {
        let snapshot = {
            let _capture_timer = Timer::new("snapshot_capture");
            SchemaSnapshot::capture(&mut provider)?
        };
        snapshot.save(path)?;
        info!(path = %path.display(), tables = snapshot.tables.len(), "Snapshot saved");
        output.info(&format!("Saved schema snapshot to {}", path.display()))?;
        // Render from the captured copy instead of querying twice
        provider = Box::new(SnapshotProvider::new(snapshot));
    }

    let mode = OutputMode::from_flags(cli.graph, cli.gitlab);
    let mut assembler = DocumentAssembler::new(provider, overrides, config.assembler_options(mode));
    assembler.output(dest, cli.force)?;

    output.success(&format!(
        "Wrote {} in {} ms",
        dest.display(),
        timer.elapsed().as_millis()
    ))?;
    timer.finish();
    Ok(())
}

/// Table comments from the migration directory
fn load_overrides(config: &Config, dir: &Path) -> Result<CommentOverrides> {
    let _timer = Timer::with_details("migration_scan", &dir.display().to_string());
    let overrides = config.migration_scanner().scan(dir)?;
    debug!(tables = overrides.len(), "Loaded comment overrides");
    Ok(overrides)
}

/// Snapshot file when `--snapshot` is given, otherwise a live connection
fn open_provider(
    cli: &Cli,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<Box<dyn SchemaProvider>> {
    if let Some(path) = &cli.snapshot {
        output.info(&format!("Reading schema snapshot {}", path.display()))?;
        return Ok(Box::new(SnapshotProvider::from_file(path)?));
    }
    connect(cli, config, output)
}

#[cfg(feature = "mysql")]
fn connect(
    cli: &Cli,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<Box<dyn SchemaProvider>> {
    use crate::config::PASSWORD_ENV;

    let password = if cli.password {
        rpassword::prompt_password("Enter password: ")?
    } else {
        std::env::var(PASSWORD_ENV).unwrap_or_default()
    };

    let params = config.connection_params(password);
    output.info(&format!("Connecting to {}", params.display_url()))?;

    let _timer = Timer::with_details("connect", &params.display_url());
    let provider = dbdoc_core::MysqlProvider::connect(&params)?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "mysql"))]
fn connect(
    _cli: &Cli,
    _config: &Config,
    _output: &mut OutputWriter,
) -> Result<Box<dyn SchemaProvider>> {
    Err(crate::error::Error::config(
        "dbdoc was built without MySQL support; use --snapshot <FILE>",
    ))
}
