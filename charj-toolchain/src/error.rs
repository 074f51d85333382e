use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::StepKind;

/// Failures that prevent a toolchain step from producing a status.
///
/// A step that runs and exits non-zero is not an error here; it is reported
/// through [`ToolchainStatus::Failed`](crate::ToolchainStatus::Failed).
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("no toolchain command configured")]
    EmptyCommand,

    #[error("failed to launch '{program}' for {step}")]
    Launch {
        step: StepKind,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{step} did not finish within {}s", timeout.as_secs_f64())]
    TimedOut { step: StepKind, timeout: Duration },

    #[error("failed to wait for {step}")]
    Wait {
        step: StepKind,
        #[source]
        source: io::Error,
    },

    #[error("failed to relay {stream} of {step}")]
    Relay {
        step: StepKind,
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to move '{}' to '{}'", from.display(), to.display())]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ToolchainError {
    /// The step the error occurred in, if it is tied to one.
    pub fn step(&self) -> Option<StepKind> {
        match self {
            ToolchainError::EmptyCommand => None,
            ToolchainError::Launch { step, .. }
            | ToolchainError::TimedOut { step, .. }
            | ToolchainError::Wait { step, .. }
            | ToolchainError::Relay { step, .. } => Some(*step),
            ToolchainError::Relocate { .. } => Some(StepKind::RelocateObject),
        }
    }
}
