//! Reference frontend for Charj.
//!
//! Parses the declaration subset of the language (a package clause and
//! classes with fields, constructors and methods whose bodies are carried
//! through verbatim) and renders the interface and implementation
//! artifacts the native toolchain compiles.

pub mod ast;
pub mod emit;
mod lexer;
mod parser;

use charj_core::{Frontend, FrontendError};

pub use parser::Parser;

/// The parser with both emitters, ready for the driver.
pub fn frontend() -> Result<Frontend<Parser>, FrontendError> {
    Frontend::new(Parser, emit::InterfaceEmitter, emit::ImplementationEmitter)
}
