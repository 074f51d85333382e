use std::io::Write;

use charj_core::Location;
use charj_toolchain::Sink;

use crate::Diagnostic;

/// Collects and prints the diagnostics of one invocation.
///
/// The error flag is set by the first report and stays set. Reporting never
/// interrupts anything; callers decide whether to go on.
pub struct Reporter {
    sink: Box<dyn Write + Send>,
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new(sink: &Sink) -> Self {
        Self {
            sink: sink.writer(),
            diagnostics: Vec::new(),
        }
    }

    pub fn report(
        &mut self,
        source_name: &str,
        message: impl Into<String>,
        location: Option<Location>,
    ) {
        self.emit(Diagnostic::new(source_name, message).at(location));
    }

    /// Report with the underlying error, whose chain is printed below the
    /// message.
    pub fn report_with_cause(
        &mut self,
        source_name: &str,
        message: impl Into<String>,
        location: Option<Location>,
        cause: &(dyn std::error::Error + 'static),
    ) {
        self.emit(
            Diagnostic::new(source_name, message)
                .at(location)
                .caused_by(cause),
        );
    }

    /// Whether anything has been reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        // A broken error stream must not stop the pipeline.
        let _ = writeln!(self.sink, "{}", diagnostic);
        for cause in &diagnostic.causes {
            let _ = writeln!(self.sink, "  caused by: {}", cause);
        }
        let _ = self.sink.flush();
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use charj_toolchain::SharedBuffer;

    use super::*;

    #[test]
    fn test_flag_starts_clear_and_stays_set() {
        let mut reporter = Reporter::new(&Sink::Buffer(SharedBuffer::new()));
        assert!(!reporter.has_errors());

        reporter.report("a.cj", "first", None);
        assert!(reporter.has_errors());

        reporter.report("a.cj", "second", None);
        assert!(reporter.has_errors());
        assert_eq!(reporter.diagnostics().len(), 2);
    }

    #[test]
    fn test_report_formats_line() {
        let buffer = SharedBuffer::new();
        let mut reporter = Reporter::new(&Sink::Buffer(buffer.clone()));

        reporter.report("a.cj", "unexpected '}'", Some(Location::new(3, 0)));
        reporter.report("a.cj", "giving up", None);

        assert_eq!(
            buffer.to_string_lossy(),
            "a.cj: line 3:0 unexpected '}'\na.cj: : giving up\n"
        );
    }

    #[test]
    fn test_report_with_cause_prints_chain() {
        let buffer = SharedBuffer::new();
        let mut reporter = Reporter::new(&Sink::Buffer(buffer.clone()));
        let cause = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");

        reporter.report_with_cause("charj", "failed to launch 'charmc'", None, &cause);

        assert_eq!(
            buffer.to_string_lossy(),
            "charj: : failed to launch 'charmc'\n  caused by: No such file or directory\n"
        );
        assert_eq!(reporter.diagnostics()[0].causes.len(), 1);
    }
}
