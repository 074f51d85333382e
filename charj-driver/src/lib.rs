//! Translation driver for Charj sources.
//!
//! [`translate`] takes one source file through the whole pipeline: it parses
//! the source once per emission pass, writes the interface and
//! implementation artifacts into the hidden `.charj` build cache next to the
//! source, and then runs the native toolchain over them. Problems are
//! reported as they happen and collected in the returned [`Translation`].
//!
//! ```no_run
//! use charj_driver::{Config, translate};
//!
//! let config = Config::from_current_dir()?;
//! let frontend = charj_syntax::frontend()?;
//! let translation = translate(&config, &frontend, "hello.cj".as_ref());
//! if let Some(report) = &translation.report {
//!     print!("{}", report);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod diagnostic;
mod error;
mod report;
mod reporter;
mod translate;

pub use config::{CONFIG_FILE, Config, ConfigError, ConfigFile};
pub use diagnostic::Diagnostic;
pub use error::Error;
pub use report::TranslationReport;
pub use reporter::Reporter;
pub use translate::{Translation, preview, translate};
