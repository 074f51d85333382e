//! Parser and emitter capabilities.
//!
//! The driver never looks inside a syntax tree. It asks a [`SourceParser`]
//! for a tree and hands that tree to an [`Emitter`] for each pass, so any
//! frontend that implements these traits can be driven.

use thiserror::Error;

use crate::{Location, PassKind, SourceCursor};

/// Malformed source reported by a parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseFailure {
    pub message: String,
    pub location: Option<Location>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Attach the location of the offending input.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Turns source text into a tree.
pub trait SourceParser {
    /// The parsed representation handed to emitters.
    type Tree;

    /// Parse from the cursor's current position to the end of the source.
    fn parse(&self, cursor: &mut SourceCursor<'_>) -> Result<Self::Tree, ParseFailure>;
}

/// Renders a parsed tree as the text of one artifact.
pub trait Emitter<T> {
    /// The pass this emitter serves.
    fn pass(&self) -> PassKind;

    /// Render the artifact text.
    fn render(&self, tree: &T) -> String;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontendError {
    #[error("{found} emitter registered for the {expected} pass")]
    MismatchedPass { expected: PassKind, found: PassKind },
}

/// A parser together with one emitter per pass.
pub struct Frontend<P: SourceParser> {
    parser: P,
    interface: Box<dyn Emitter<P::Tree>>,
    implementation: Box<dyn Emitter<P::Tree>>,
}

impl<P: SourceParser> Frontend<P> {
    pub fn new(
        parser: P,
        interface: impl Emitter<P::Tree> + 'static,
        implementation: impl Emitter<P::Tree> + 'static,
    ) -> Result<Self, FrontendError> {
        check_pass(PassKind::Interface, interface.pass())?;
        check_pass(PassKind::Implementation, implementation.pass())?;

        Ok(Self {
            parser,
            interface: Box::new(interface),
            implementation: Box::new(implementation),
        })
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// The emitter registered for `kind`.
    pub fn emitter(&self, kind: PassKind) -> &dyn Emitter<P::Tree> {
        match kind {
            PassKind::Interface => self.interface.as_ref(),
            PassKind::Implementation => self.implementation.as_ref(),
        }
    }
}

fn check_pass(expected: PassKind, found: PassKind) -> Result<(), FrontendError> {
    if expected == found {
        Ok(())
    } else {
        Err(FrontendError::MismatchedPass { expected, found })
    }
}
