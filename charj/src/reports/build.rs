//! Build command report data structures.

use std::path::PathBuf;

use charj_driver::Error;

use super::output::{Output, Report};

/// Report data from translating and compiling one source file.
#[derive(Debug)]
pub struct BuildReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Combined generated code, when it should be shown.
    pub report: Option<String>,
    /// Artifacts written to the build cache.
    pub artifacts: Vec<PathBuf>,
    /// The compiled object in the working directory.
    pub object: Option<PathBuf>,
    /// Why the build failed. Diagnostics were already printed.
    pub error: Option<Error>,
}

impl BuildReport {
    /// The failure rendered in full, when that says more than the
    /// diagnostic line already printed: a parse error pointing into the
    /// source, or a launch failure with its hint.
    pub fn take_rendered_error(&mut self) -> Option<miette::Report> {
        match self.error.take()? {
            err @ (Error::Parse { span: Some(_), .. } | Error::Launch { .. }) => {
                Some(miette::Report::new(err))
            }
            _ => None,
        }
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(report) = &self.report {
            out.preformatted(report);
        }

        if self.dry_run || self.artifacts.is_empty() {
            return;
        }

        out.section("Generated");
        for path in &self.artifacts {
            out.added_item(&path.display().to_string());
        }

        if let Some(object) = &self.object {
            out.key_value("Compiled", &object.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::TextOutput;

    #[test]
    fn test_render_written() {
        let report = BuildReport {
            dry_run: false,
            report: None,
            artifacts: vec![".charj/a.ci".into(), ".charj/a.cc".into()],
            object: Some("a.o".into()),
            error: None,
        };

        let mut out = TextOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.0,
            "Generated:\n  + .charj/a.ci\n  + .charj/a.cc\nCompiled: a.o\n"
        );
    }

    #[test]
    fn test_render_dry_run_prints_only_code() {
        let report = BuildReport {
            dry_run: true,
            report: Some("-----CI\n".to_string()),
            artifacts: Vec::new(),
            object: None,
            error: None,
        };

        let mut out = TextOutput::default();
        report.render(&mut out);

        assert_eq!(out.0, "-----CI\n");
    }

    fn failed(error: Error) -> BuildReport {
        BuildReport {
            dry_run: false,
            report: None,
            artifacts: Vec::new(),
            object: None,
            error: Some(error),
        }
    }

    #[test]
    fn test_parse_error_is_rendered_with_source() {
        let mut report = failed(Error::Parse {
            src: miette::NamedSource::new("a.cj", "class A {\n    int x\n}\n".to_string()),
            span: Some((20, 1).into()),
            location: None,
            message: "expected ';', found '}'".to_string(),
        });

        assert!(report.take_rendered_error().is_some());
        assert!(report.error.is_none());
    }

    #[test]
    fn test_plain_failures_are_not_rendered_again() {
        let mut report = failed(Error::Parse {
            src: miette::NamedSource::new("a.cj", String::new()),
            span: None,
            location: None,
            message: "unsupported construct".to_string(),
        });
        assert!(report.take_rendered_error().is_none());

        let mut report = failed(Error::Io {
            action: "failed to read source",
            path: "a.cj".into(),
            source: std::io::Error::other("gone"),
        });
        assert!(report.take_rendered_error().is_none());
    }
}
