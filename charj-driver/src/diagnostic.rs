//! Diagnostics produced while translating a source unit.

use std::fmt;

use charj_core::Location;

/// A reported problem.
///
/// Diagnostics carry no severity: every one of them marks the invocation as
/// having errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source (or component) the diagnostic is about.
    pub source_name: String,
    pub location: Option<Location>,
    pub message: String,
    /// Rendered cause chain, outermost first.
    pub causes: Vec<String>,
}

impl Diagnostic {
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            location: None,
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// Record the chain of `cause` and everything it wraps.
    pub fn caused_by(mut self, cause: &(dyn std::error::Error + 'static)) -> Self {
        let mut next = Some(cause);
        while let Some(err) = next {
            self.causes.push(err.to_string());
            next = err.source();
        }
        self
    }
}

/// `<source>: line <L>:<C> <message>`, or `<source>: : <message>` without a
/// location.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.source_name)?;
        match &self.location {
            Some(location) => write!(f, "{}", location)?,
            None => write!(f, ":")?,
        }
        write!(f, " {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::new("hello.cj", "expected ';'").at(Some(Location::new(4, 17)));
        assert_eq!(diag.to_string(), "hello.cj: line 4:17 expected ';'");
    }

    #[test]
    fn test_display_without_location() {
        let diag = Diagnostic::new("charj", "no toolchain configured");
        assert_eq!(diag.to_string(), "charj: : no toolchain configured");
    }

    #[test]
    fn test_cause_chain() {
        let inner = io::Error::other("permission denied");
        let outer = charj_core::WriteError::Write {
            path: ".charj/a.ci".into(),
            source: inner,
        };

        let diag = Diagnostic::new("a.cj", "cannot write").caused_by(&outer);

        assert_eq!(
            diag.causes,
            vec![
                "failed to write artifact '.charj/a.ci'".to_string(),
                "permission denied".to_string(),
            ]
        );
    }
}
