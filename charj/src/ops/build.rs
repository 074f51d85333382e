//! Build operation - translate a source file and compile it.

use std::{path::Path, time::Duration};

use charj_driver::{Config, ConfigFile, preview, translate};
use eyre::{Context, Result};
use tracing::debug;

use crate::reports::BuildReport;

/// Options for the build operation. Set values override the config file.
pub struct BuildOptions<'a> {
    pub source: &'a Path,
    pub toolchain: Option<&'a str>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub verbose: bool,
    pub debug: bool,
    /// Render both passes without writing or compiling.
    pub dry_run: bool,
    pub compile: bool,
}

/// Execute the build operation.
///
/// Failures of the translation itself are returned inside the report;
/// only problems setting it up are errors.
pub fn build(file: Option<&ConfigFile>, opts: BuildOptions) -> Result<BuildReport> {
    let config = configure(file, &opts)?;
    debug!(?config, "configured");

    let frontend = charj_syntax::frontend().wrap_err("Failed to set up the frontend")?;
    let translation = if opts.dry_run {
        preview(&config, &frontend, opts.source)
    } else {
        translate(&config, &frontend, opts.source)
    };

    let show_report = opts.dry_run || config.debug;
    Ok(BuildReport {
        dry_run: opts.dry_run,
        report: translation
            .report
            .as_ref()
            .filter(|_| show_report)
            .map(ToString::to_string),
        artifacts: translation.artifacts.iter().map(|a| a.path.clone()).collect(),
        object: translation.object().map(Path::to_path_buf),
        error: translation.error,
    })
}

fn configure(file: Option<&ConfigFile>, opts: &BuildOptions) -> Result<Config> {
    let mut config =
        Config::from_current_dir().wrap_err("Failed to determine the working directory")?;
    if let Some(file) = file {
        config = config.with_file(file);
    }
    if let Some(toolchain) = opts.toolchain {
        config = config.toolchain(toolchain);
    }
    if let Some(secs) = opts.timeout {
        config = config.timeout(Some(Duration::from_secs(secs)));
    }

    let verbose = config.verbose || opts.verbose;
    let debug = config.debug || opts.debug;
    Ok(config.verbose(verbose).debug(debug).compile(opts.compile))
}
