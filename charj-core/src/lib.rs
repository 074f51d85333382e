//! Core types for the Charj translator.
//!
//! This crate provides the pieces shared by the driver, the toolchain
//! invoker and frontends:
//!
//! - [`SourceUnit`] / [`SourceCursor`] - a loaded source file and a
//!   re-seekable cursor over it
//! - [`PassKind`] / [`TranslationPass`] - the two emission passes
//! - [`ArtifactWriter`] / [`Artifact`] - persisting generated text into the
//!   hidden build-cache directory
//! - [`frontend`] - the parser and emitter capabilities the driver runs

mod artifact;
pub mod frontend;
mod pass;
pub mod paths;
mod source;

pub use artifact::{Artifact, ArtifactWriter, WriteError};
pub use frontend::{Emitter, Frontend, FrontendError, ParseFailure, SourceParser};
pub use pass::{PassKind, TranslationPass};
pub use source::{Location, SourceCursor, SourceUnit};
