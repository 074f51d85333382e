//! The translation pipeline.

use std::{
    io,
    path::{Path, PathBuf},
};

use charj_core::{
    Artifact, ArtifactWriter, Frontend, PassKind, SourceParser, SourceUnit, TranslationPass,
    paths,
};
use charj_toolchain::{
    Invoker, StepKind, ToolchainCommand, ToolchainError, ToolchainOutcome, ToolchainStatus,
};
use tracing::{debug, debug_span, info};

use crate::{Config, Diagnostic, Error, Reporter, TranslationReport};

/// Name used for diagnostics that are not about a source location.
const DRIVER_NAME: &str = "charj";

/// Everything one invocation produced.
#[derive(Debug)]
pub struct Translation {
    pub source: PathBuf,
    /// Both generated bodies; present once both artifacts were written.
    pub report: Option<TranslationReport>,
    /// Artifacts written, interface first.
    pub artifacts: Vec<Artifact>,
    /// Present if the toolchain ran far enough to report a status.
    pub toolchain: Option<ToolchainOutcome>,
    pub diagnostics: Vec<Diagnostic>,
    /// Why the invocation did not succeed.
    pub error: Option<Error>,
}

impl Translation {
    fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            report: None,
            artifacts: Vec::new(),
            toolchain: None,
            diagnostics: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Whether any diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The relocated object, if compilation finished.
    pub fn object(&self) -> Option<&Path> {
        match &self.toolchain.as_ref()?.status {
            ToolchainStatus::Succeeded { object } => Some(object),
            ToolchainStatus::Failed { .. } => None,
        }
    }
}

/// Translate `source` and compile the result.
///
/// The source is parsed twice, once per pass, from a rewound cursor; the
/// tree of the interface pass is never reused for the implementation. Both
/// artifacts are written only after both passes succeeded, so a parse
/// failure leaves the build cache untouched. The toolchain runs only after
/// both artifacts are on disk, and only if `config.compile` is set.
///
/// Each call owns its diagnostics; nothing is shared between calls.
pub fn translate<P: SourceParser>(
    config: &Config,
    frontend: &Frontend<P>,
    source: &Path,
) -> Translation {
    let _span = debug_span!("translate", source = %source.display()).entered();
    let mut reporter = Reporter::new(&config.errors);
    let mut translation = Translation::new(source);

    let result = build(config, frontend, source, &mut reporter, &mut translation);

    translation.diagnostics = reporter.into_diagnostics();
    translation.error = result.err();
    translation
}

/// Run both passes and return the report without writing or compiling.
pub fn preview<P: SourceParser>(
    config: &Config,
    frontend: &Frontend<P>,
    source: &Path,
) -> Translation {
    let mut reporter = Reporter::new(&config.errors);
    let mut translation = Translation::new(source);

    let result = load(source, &mut reporter)
        .and_then(|unit| emit_passes(frontend, &unit, &mut reporter))
        .map(|passes| translation.report = Some(TranslationReport::from_passes(&passes)));

    translation.diagnostics = reporter.into_diagnostics();
    translation.error = result.err();
    translation
}

fn build<P: SourceParser>(
    config: &Config,
    frontend: &Frontend<P>,
    source: &Path,
    reporter: &mut Reporter,
    translation: &mut Translation,
) -> Result<(), Error> {
    let unit = load(source, reporter)?;
    let passes = emit_passes(frontend, &unit, reporter)?;

    let writer = ArtifactWriter::new().verbose(config.verbose);
    for pass in &passes {
        let artifact = writer.write(source, &pass.text, pass.kind).map_err(|e| {
            reporter.report_with_cause(&unit.name(), "cannot write artifact", None, &e);
            Error::from(e)
        })?;
        translation.artifacts.push(artifact);
    }
    translation.report = Some(TranslationReport::from_passes(&passes));

    if !config.compile {
        debug!("compilation disabled");
        return Ok(());
    }

    let outcome = compile(config, &paths::base_path(source), reporter)?;
    let status = outcome.status.clone();
    translation.toolchain = Some(outcome);

    match status {
        ToolchainStatus::Succeeded { object } => {
            if config.verbose {
                info!(object = %object.display(), "compiled");
            }
            Ok(())
        }
        ToolchainStatus::Failed { step, code, reason } => {
            reporter.report(&unit.name(), format!("{} failed: {}", step, reason), None);
            Err(Error::Toolchain { step, code, reason })
        }
    }
}

fn load(source: &Path, reporter: &mut Reporter) -> Result<SourceUnit, Error> {
    SourceUnit::open(source).map_err(|e| {
        let name = source.display().to_string();
        reporter.report_with_cause(&name, "cannot read source", None, &e);
        Error::read(source, e)
    })
}

/// Parse and render once per pass, rewinding the cursor between passes.
fn emit_passes<P: SourceParser>(
    frontend: &Frontend<P>,
    unit: &SourceUnit,
    reporter: &mut Reporter,
) -> Result<Vec<TranslationPass>, Error> {
    let mut cursor = unit.cursor();
    let mut passes = Vec::with_capacity(PassKind::ALL.len());

    for kind in PassKind::ALL {
        cursor.rewind();
        let tree = frontend.parser().parse(&mut cursor).map_err(|failure| {
            reporter.report(&unit.name(), failure.message.clone(), failure.location);
            Error::parse(unit, failure.message, failure.location)
        })?;

        let text = frontend.emitter(kind).render(&tree);
        debug!(pass = %kind, bytes = text.len(), "rendered");
        passes.push(TranslationPass::new(kind, text));
    }

    Ok(passes)
}

fn compile(
    config: &Config,
    base: &Path,
    reporter: &mut Reporter,
) -> Result<ToolchainOutcome, Error> {
    let outcome = ToolchainCommand::parse(&config.toolchain).and_then(|toolchain| {
        Invoker::new(toolchain, &config.work_dir)
            .timeout(config.timeout)
            .verbose(config.verbose)
            .sinks(config.output.clone(), config.errors.clone())
            .compile(base)
    });

    outcome.map_err(|e| {
        match std::error::Error::source(&e) {
            Some(cause) => reporter.report_with_cause(DRIVER_NAME, e.to_string(), None, cause),
            None => reporter.report(DRIVER_NAME, e.to_string(), None),
        }
        toolchain_error(e, &config.toolchain)
    })
}

fn toolchain_error(err: ToolchainError, toolchain: &str) -> Error {
    match err {
        ToolchainError::Launch {
            program, source, ..
        } => Error::Launch { program, source },
        ToolchainError::EmptyCommand => Error::Launch {
            program: toolchain.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty toolchain command"),
        },
        other => Error::Toolchain {
            step: other.step().unwrap_or(StepKind::CompileInterface),
            code: None,
            reason: other.to_string(),
        },
    }
}
