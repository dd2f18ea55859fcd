//! CLI support for the showcase binary.
//!
//! Argument parsing and logging setup live here rather than in the
//! binary so they can be tested without a terminal.

mod args;

pub use args::Args;

use crate::config::LoggingConfig;
use crate::error::{ShowcaseError, ShowcaseResult};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a file-backed `tracing` subscriber if `config` names a log
/// file. Returns whether logging was enabled.
///
/// The terminal owns stdout while the UI runs, so without a file nothing
/// is logged.
///
/// # Errors
///
/// Returns error if the file cannot be created, the filter does not
/// parse, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> ShowcaseResult<bool> {
    let Some(path) = &config.file else {
        return Ok(false);
    };

    let filter = parse_filter(&config.filter)?;
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| ShowcaseError::config(format!("logging already initialized: {e}")))?;

    tracing::info!(path = %path.display(), filter = %config.filter, "logging to file");
    Ok(true)
}

/// Parse an `EnvFilter` directive.
///
/// # Errors
///
/// Returns error if the directive is malformed.
pub fn parse_filter(directive: &str) -> ShowcaseResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| ShowcaseError::config(format!("invalid log filter '{directive}': {e}")))
}
