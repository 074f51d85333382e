use std::path::PathBuf;

use charj_driver::ConfigFile;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    logging, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Source file to translate
    pub file: PathBuf,

    /// Toolchain command, e.g. "charmc -O3" (overrides charj.toml)
    #[arg(short, long)]
    pub toolchain: Option<String>,

    /// Path to charj.toml (defaults to the one next to the source)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Kill a toolchain step after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the generated code without writing or compiling anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the artifacts but do not run the toolchain
    #[arg(long)]
    pub no_compile: bool,
}

impl BuildCommand {
    pub fn run(&self, verbose: bool, debug: bool) -> Result<()> {
        let file = self.config_file().unwrap_or_exit();

        let verbose = verbose || file.as_ref().and_then(|f| f.verbose).unwrap_or(false);
        let debug = debug || file.as_ref().and_then(|f| f.debug).unwrap_or(false);
        logging::init(verbose, debug);

        let mut report = ops::build(
            file.as_ref(),
            ops::build::BuildOptions {
                source: &self.file,
                toolchain: self.toolchain.as_deref(),
                timeout: self.timeout,
                verbose,
                debug,
                dry_run: self.dry_run,
                compile: !self.no_compile,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.error.is_some() {
            // Diagnostics are already on stderr; add only what they lack.
            if let Some(rendered) = report.take_rendered_error() {
                eprintln!("{:?}", rendered);
            }
            std::process::exit(1);
        }
        Ok(())
    }

    fn config_file(&self) -> Result<Option<ConfigFile>, Box<charj_driver::ConfigError>> {
        match &self.config {
            Some(path) => ConfigFile::open(path).map(Some),
            None => ConfigFile::discover(&charj_core::paths::source_dir(&self.file)),
        }
    }
}
