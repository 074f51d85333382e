//! Ordered invocation of the native toolchain.
//!
//! Compiling a translated unit takes three steps that must run in order,
//! each one consuming what the previous produced:
//!
//! 1. compile the interface artifact
//! 2. compile the implementation artifact to an object (`-c`)
//! 3. move the object into the caller's working directory
//!
//! The [`Invoker`] stops at the first step that does not succeed and leaves
//! everything already on disk in place. While a step runs, its stdout and
//! stderr are relayed concurrently so a chatty compiler can neither stall
//! nor lose output.

mod error;
mod invoker;
mod relay;
mod step;

pub use error::ToolchainError;
pub use invoker::{Invoker, StepRecord, ToolchainOutcome, ToolchainStatus};
pub use relay::{SharedBuffer, Sink};
pub use step::{CommandLine, StepAction, StepKind, ToolchainCommand, ToolchainStep, plan};

/// Flag that makes the compiler stop after producing an object.
pub const COMPILE_ONLY_FLAG: &str = "-c";

/// Toolchain used when nothing else is configured.
pub const DEFAULT_TOOLCHAIN: &str = "charmc";
