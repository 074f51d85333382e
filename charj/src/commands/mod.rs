mod build;
mod clean;
mod completions;

use build::BuildCommand;
use clap::{Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T, Box<charj_driver::ConfigError>> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "charjc")]
#[command(version)]
#[command(about = "Translate Charj sources and compile them with the native toolchain")]
pub(crate) struct Cli {
    /// Echo created artifacts and executed commands
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print debug logs
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(self.verbose, self.debug),
            Commands::Clean(cmd) => cmd.run(self.verbose, self.debug),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a source file and compile it
    Build(BuildCommand),

    /// Remove the build cache next to a source file
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
