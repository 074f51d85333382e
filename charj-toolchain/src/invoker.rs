use std::{
    io,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::{
    StepAction, StepKind, ToolchainCommand, ToolchainError, ToolchainStep,
    relay::{Sink, relay},
    step::{CommandLine, plan},
};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What happened to one step that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    /// The command line, or the move, as it would be typed in a shell.
    pub action: String,
    /// Exit code of the child; `None` if it was killed by a signal or the
    /// step ran in-process.
    pub code: Option<i32>,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainStatus {
    /// All steps succeeded; the object is at the given path.
    Succeeded { object: PathBuf },
    /// The pipeline halted at `step`.
    Failed {
        step: StepKind,
        code: Option<i32>,
        reason: String,
    },
}

/// Result of a toolchain run that was able to report a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainOutcome {
    /// Steps that ran, in order.
    pub steps: Vec<StepRecord>,
    pub status: ToolchainStatus,
}

impl ToolchainOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ToolchainStatus::Succeeded { .. })
    }
}

/// Runs the compile/compile/relocate sequence for one translated unit.
///
/// # Example
///
/// ```ignore
/// let invoker = Invoker::new(ToolchainCommand::parse("charmc")?, std::env::current_dir()?)
///     .timeout(Some(Duration::from_secs(120)));
/// let outcome = invoker.compile(Path::new("src/.charj/hello"))?;
/// ```
#[derive(Debug, Clone)]
pub struct Invoker {
    toolchain: ToolchainCommand,
    work_dir: PathBuf,
    timeout: Option<Duration>,
    verbose: bool,
    stdout: Sink,
    stderr: Sink,
}

impl Invoker {
    /// `work_dir` is where the finished object is moved to.
    pub fn new(toolchain: ToolchainCommand, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain,
            work_dir: work_dir.into(),
            timeout: None,
            verbose: false,
            stdout: Sink::Stdout,
            stderr: Sink::Stderr,
        }
    }

    /// Kill a step that runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Announce every executed command at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Redirect the children's output streams.
    pub fn sinks(mut self, stdout: Sink, stderr: Sink) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    /// The steps [`compile`](Self::compile) would run for `base`.
    pub fn plan(&self, base: &Path) -> [ToolchainStep; 3] {
        plan(&self.toolchain, base, &self.work_dir)
    }

    /// Compile the artifacts at `base` (`<cache>/<stem>`).
    ///
    /// A step that exits non-zero ends the run with
    /// [`ToolchainStatus::Failed`]; later steps do not run and nothing is
    /// cleaned up.
    ///
    /// # Errors
    ///
    /// Returns an error if a step cannot produce a status at all: the
    /// program cannot be launched, the step times out, output cannot be
    /// relayed or the object cannot be moved.
    pub fn compile(&self, base: &Path) -> Result<ToolchainOutcome, ToolchainError> {
        let steps = self.plan(base);
        let mut records = Vec::with_capacity(steps.len());

        for step in &steps {
            let record = self.run_step(step)?;
            let success = record.success;
            let code = record.code;
            records.push(record);

            if !success {
                debug!(step = %step.kind, ?code, "toolchain step failed");
                return Ok(ToolchainOutcome {
                    steps: records,
                    status: ToolchainStatus::Failed {
                        step: step.kind,
                        code,
                        reason: exit_reason(code),
                    },
                });
            }

            if let Some(output) = &step.output {
                if !output.exists() {
                    debug!(step = %step.kind, output = %output.display(), "expected output missing");
                    return Ok(ToolchainOutcome {
                        steps: records,
                        status: ToolchainStatus::Failed {
                            step: step.kind,
                            code,
                            reason: format!("'{}' was not produced", output.display()),
                        },
                    });
                }
            }
        }

        let [.., relocate_step] = steps;
        let object = relocate_step.output.unwrap_or_else(|| self.work_dir.clone());
        Ok(ToolchainOutcome {
            steps: records,
            status: ToolchainStatus::Succeeded { object },
        })
    }

    fn run_step(&self, step: &ToolchainStep) -> Result<StepRecord, ToolchainError> {
        let action = step.action.to_string();
        if self.verbose {
            info!("exec: {}", action);
        } else {
            debug!(step = %step.kind, "exec: {}", action);
        }

        match &step.action {
            StepAction::Exec(line) => {
                let status = self.exec(step.kind, line)?;
                Ok(StepRecord {
                    kind: step.kind,
                    action,
                    code: status.code(),
                    success: status.success(),
                })
            }
            StepAction::Relocate { from, to } => {
                relocate(from, to)?;
                Ok(StepRecord {
                    kind: step.kind,
                    action,
                    code: None,
                    success: true,
                })
            }
        }
    }

    /// Run one command and return its exit status once both of its output
    /// streams have been relayed to the end.
    fn exec(&self, kind: StepKind, line: &CommandLine) -> Result<ExitStatus, ToolchainError> {
        let mut command = Command::new(&line.program);
        command
            .args(&line.args)
            .current_dir(&line.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // A timed step gets its own process group so a kill reaches whatever
        // a wrapper script forked. Untimed steps stay in ours and see Ctrl-C.
        if self.timeout.is_some() {
            own_process_group(&mut command);
        }

        let mut child = command
            .spawn()
            .map_err(|e| ToolchainError::Launch {
                step: kind,
                program: line.program.clone(),
                source: e,
            })?;

        let child_stdout = child.stdout.take().ok_or_else(|| ToolchainError::Relay {
            step: kind,
            stream: "stdout",
            source: io::Error::other("stdout was not captured"),
        })?;
        let child_stderr = child.stderr.take().ok_or_else(|| ToolchainError::Relay {
            step: kind,
            stream: "stderr",
            source: io::Error::other("stderr was not captured"),
        })?;

        thread::scope(|scope| {
            let out = scope.spawn(|| relay(child_stdout, &self.stdout));
            let err = scope.spawn(|| relay(child_stderr, &self.stderr));

            let waited = self.wait(kind, &mut child);

            // Both relays end once every holder of the pipes' write ends has
            // exited, grandchildren included.
            let out = joined(kind, "stdout", out.join())?;
            let err = joined(kind, "stderr", err.join())?;
            debug!(step = %kind, stdout = out, stderr = err, "relayed output");

            waited
        })
    }

    fn wait(&self, kind: StepKind, child: &mut Child) -> Result<ExitStatus, ToolchainError> {
        let wait_error = |e| ToolchainError::Wait {
            step: kind,
            source: e,
        };

        let Some(timeout) = self.timeout else {
            return child.wait().map_err(wait_error);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().map_err(wait_error)? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                debug!(step = %kind, ?timeout, "killing toolchain step group");
                // The child may have exited between try_wait and kill.
                let _ = kill_tree(child);
                child.wait().map_err(wait_error)?;
                return Err(ToolchainError::TimedOut {
                    step: kind,
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kill `child` and, on unix, every process in its group.
fn kill_tree(child: &mut Child) -> io::Result<()> {
    #[cfg(unix)]
    {
        // The child leads its own group, so its pid is the group id. It has
        // not been reaped yet, which keeps the id from being reused.
        let group = child.id() as libc::pid_t;
        // SAFETY: killpg takes plain integers and touches no memory of ours.
        if unsafe { libc::killpg(group, libc::SIGKILL) } == 0 {
            return Ok(());
        }
    }
    child.kill()
}

fn joined(
    kind: StepKind,
    stream: &'static str,
    result: thread::Result<io::Result<u64>>,
) -> Result<u64, ToolchainError> {
    match result {
        Ok(Ok(copied)) => Ok(copied),
        Ok(Err(e)) => Err(ToolchainError::Relay {
            step: kind,
            stream,
            source: e,
        }),
        Err(_) => Err(ToolchainError::Relay {
            step: kind,
            stream,
            source: io::Error::other("relay thread panicked"),
        }),
    }
}

/// Move `from` to `to`, replacing `to`.
///
/// Falls back to copy and remove when a rename is not possible, e.g. across
/// filesystems.
fn relocate(from: &Path, to: &Path) -> Result<(), ToolchainError> {
    let relocate_error = |e| ToolchainError::Relocate {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    };

    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to).map_err(relocate_error)?;
    std::fs::remove_file(from).map_err(relocate_error)
}

fn exit_reason(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}
