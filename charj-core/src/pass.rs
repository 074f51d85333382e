use std::fmt;

use crate::paths;

/// Which artifact an emission pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Declaration-only interface description.
    Interface,
    /// Full-body implementation.
    Implementation,
}

impl PassKind {
    /// Both passes, in execution order.
    pub const ALL: [PassKind; 2] = [PassKind::Interface, PassKind::Implementation];

    /// File extension of the artifact, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            PassKind::Interface => paths::INTERFACE_EXTENSION,
            PassKind::Implementation => paths::IMPLEMENTATION_EXTENSION,
        }
    }

    /// Label used for the section header of the combined report.
    pub fn label(&self) -> &'static str {
        match self {
            PassKind::Interface => "CI",
            PassKind::Implementation => "CC",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Interface => write!(f, "interface"),
            PassKind::Implementation => write!(f, "implementation"),
        }
    }
}

/// The text produced by one emission pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPass {
    pub kind: PassKind,
    pub text: String,
}

impl TranslationPass {
    pub fn new(kind: PassKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
