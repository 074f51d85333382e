use std::{
    fmt,
    path::{Path, PathBuf},
};

use charj_core::paths;

use crate::{COMPILE_ONLY_FLAG, ToolchainError};

/// The three steps of a toolchain run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    CompileInterface,
    CompileImplementation,
    RelocateObject,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::CompileInterface => write!(f, "interface compilation"),
            StepKind::CompileImplementation => write!(f, "implementation compilation"),
            StepKind::RelocateObject => write!(f, "object relocation"),
        }
    }
}

/// The configured toolchain: an executable plus any leading options,
/// e.g. `charmc -O3 -language charm++`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolchainCommand {
    /// Split a toolchain string on whitespace.
    pub fn parse(command: &str) -> Result<Self, ToolchainError> {
        let mut words = command.split_whitespace().map(String::from);
        let program = words.next().ok_or(ToolchainError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Anchor a relative program path like `tools/charmc` at `dir`.
    ///
    /// Steps run inside the build cache, so a relative path would otherwise
    /// be looked up from the wrong directory. The result is absolute even
    /// when `dir` is not. Bare names are left for `PATH` lookup.
    pub fn resolved_against(&self, dir: &Path) -> Self {
        let program = Path::new(&self.program);
        let program = if program.is_relative() && program.components().count() > 1 {
            let anchored = dir.join(program);
            std::path::absolute(&anchored)
                .unwrap_or(anchored)
                .display()
                .to_string()
        } else {
            self.program.clone()
        };
        Self {
            program,
            args: self.args.clone(),
        }
    }
}

impl fmt::Display for ToolchainCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run an external command.
    Exec(CommandLine),
    /// Move a file, replacing the destination.
    Relocate { from: PathBuf, to: PathBuf },
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Exec(line) => write!(f, "{}", line),
            StepAction::Relocate { from, to } => {
                write!(f, "mv -f {} {}", from.display(), to.display())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainStep {
    pub kind: StepKind,
    pub action: StepAction,
    /// File the step must leave behind.
    pub output: Option<PathBuf>,
}

/// Build the three steps for the artifacts at `base` (`<cache>/<stem>`).
///
/// Compilation runs inside the build cache so that anything the toolchain
/// generates next to its input stays there; the object ends up in
/// `work_dir`.
pub fn plan(toolchain: &ToolchainCommand, base: &Path, work_dir: &Path) -> [ToolchainStep; 3] {
    let cache = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let stem = base
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let toolchain = toolchain.resolved_against(work_dir);

    let exec = |extra: &[&str], input: String| {
        let mut args = toolchain.args.clone();
        args.extend(extra.iter().map(|s| s.to_string()));
        args.push(input);
        CommandLine {
            program: toolchain.program.clone(),
            args,
            cwd: cache.clone(),
        }
    };

    let object_name = format!("{}.{}", stem, paths::OBJECT_EXTENSION);
    let object = cache.join(&object_name);
    let relocated = work_dir.join(&object_name);

    [
        ToolchainStep {
            kind: StepKind::CompileInterface,
            action: StepAction::Exec(exec(
                &[],
                format!("{}.{}", stem, paths::INTERFACE_EXTENSION),
            )),
            output: None,
        },
        ToolchainStep {
            kind: StepKind::CompileImplementation,
            action: StepAction::Exec(exec(
                &[COMPILE_ONLY_FLAG],
                format!("{}.{}", stem, paths::IMPLEMENTATION_EXTENSION),
            )),
            output: Some(object.clone()),
        },
        ToolchainStep {
            kind: StepKind::RelocateObject,
            action: StepAction::Relocate {
                from: object,
                to: relocated.clone(),
            },
            output: Some(relocated),
        },
    ]
}
