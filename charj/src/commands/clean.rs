use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    logging, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Source file, or the directory holding the build cache
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl CleanCommand {
    pub fn run(&self, verbose: bool, debug: bool) -> Result<()> {
        logging::init(verbose, debug);

        let report = ops::clean(&self.path, verbose)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
