use std::{io, path::PathBuf};

use charj_core::{Location, SourceUnit, WriteError};
use charj_toolchain::StepKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Why a translation did not succeed.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The source is malformed. Nothing was written.
    #[error("{message}")]
    #[diagnostic(code(charj::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        location: Option<Location>,
        message: String,
    },

    /// The source could not be read or an artifact could not be written.
    #[error("{action} '{}'", path.display())]
    #[diagnostic(code(charj::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A toolchain step did not succeed.
    #[error("{step} failed: {reason}")]
    #[diagnostic(code(charj::toolchain))]
    Toolchain {
        step: StepKind,
        code: Option<i32>,
        reason: String,
    },

    /// The toolchain executable could not be started.
    #[error("failed to launch toolchain '{program}'")]
    #[diagnostic(
        code(charj::launch),
        help("set `toolchain` in charj.toml or pass --toolchain")
    )]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn parse(
        unit: &SourceUnit,
        message: impl Into<String>,
        location: Option<Location>,
    ) -> Self {
        let span = location
            .and_then(|loc| byte_offset(unit.text(), loc))
            .map(|offset| SourceSpan::from((offset, 1)));
        Error::Parse {
            src: NamedSource::new(unit.name(), unit.text().to_string()),
            span,
            location,
            message: message.into(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action: "failed to read source",
            path: path.into(),
            source,
        }
    }
}

impl From<WriteError> for Error {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::CreateDir { path, source } => Error::Io {
                action: "failed to create build cache directory",
                path,
                source,
            },
            WriteError::Write { path, source } => Error::Io {
                action: "failed to write artifact",
                path,
                source,
            },
            WriteError::Remove { path, source } => Error::Io {
                action: "failed to remove build cache directory",
                path,
                source,
            },
        }
    }
}

/// Byte offset of a line/column location, columns counted in characters.
fn byte_offset(text: &str, location: Location) -> Option<usize> {
    let line_index = usize::try_from(location.line.checked_sub(1)?).ok()?;
    let mut line_start = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i == line_index {
            let column = usize::try_from(location.column).ok()?;
            let within = line
                .char_indices()
                .nth(column)
                .map(|(offset, _)| offset)
                .unwrap_or(line.len());
            return Some(line_start + within);
        }
        line_start += line.len();
    }
    // A location just past the last line, e.g. unexpected end of input.
    (line_index == text.split_inclusive('\n').count()).then_some(text.len())
}
