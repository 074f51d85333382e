//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod build;
mod clean;
mod output;

pub use build::BuildReport;
pub use clean::CleanReport;
pub use output::{Report, TerminalOutput};
