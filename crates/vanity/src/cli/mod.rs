//! # CLI Layer
//!
//! This module is **one possible UI client** for vanityapp. It is the only
//! place that:
//! - Parses command-line arguments
//! - Writes to stdout/stderr and decides the exit code (via `main`)
//! - Installs the tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: `-url`/`--url` (plus a hidden `--verbose`) via clap (setup.rs)
//! 2. **Context Setup**: load config and build the API (`vanityapp::init`)
//! 3. **Output**: print exactly the repository URL on success
//! 4. **Error Handling**: map failures to the user-facing messages

mod setup;

use setup::parse_cli;
use std::io::Write;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use vanityapp::api::ImportPathResolver;
use vanityapp::error::VanityError;
use vanityapp::init::initialize;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Must provide vanity url to resolve")]
    MissingUrl,

    #[error("Couldn't get repo for {path}: {source}")]
    Resolve { path: String, source: VanityError },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run() -> Result<(), CliError> {
    let cli = parse_cli();
    init_tracing(cli.verbose);
    if !cli.rest.is_empty() {
        tracing::debug!(ignored = ?cli.rest, "ignoring arguments after flags");
    }

    if cli.url.is_empty() {
        return Err(CliError::MissingUrl);
    }

    let ctx = initialize().map_err(|source| CliError::Resolve {
        path: cli.url.clone(),
        source,
    })?;

    let stdout = std::io::stdout();
    resolve_and_print(&ctx.api, &cli.url, cli.verbose, &mut stdout.lock())
}

/// Resolve `import_path` and write the repository URL, and nothing else, to `out`.
pub fn resolve_and_print<R, W>(
    resolver: &R,
    import_path: &str,
    verbose: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    R: ImportPathResolver,
    W: Write,
{
    if import_path.is_empty() {
        return Err(CliError::MissingUrl);
    }

    let root = resolver
        .resolve(import_path, verbose)
        .map_err(|source| CliError::Resolve {
            path: import_path.to_string(),
            source,
        })?;
    tracing::info!(vcs = %root.vcs, root = %root.root, "resolved");

    writeln!(out, "{}", root.repo)?;
    Ok(())
}

/// Diagnostics go to stderr so stdout only ever carries the result.
/// Quiet by default; `--verbose` shows info, and `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
