//! Integration tests for the toolchain invoker.
//!
//! Each test installs a shell script as the toolchain (run through `sh`).
//! The script appends its arguments to `calls.log` next to the work
//! directory, so tests can see exactly which steps ran.
#![cfg(unix)]

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use charj_toolchain::{
    Invoker, SharedBuffer, Sink, StepKind, ToolchainCommand, ToolchainError, ToolchainStatus,
};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    stdout: SharedBuffer,
    stderr: SharedBuffer,
}

impl Fixture {
    /// Lay out `work/.charj/hello.{ci,cc}` and install `body` as the toolchain.
    fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = dir.path().join("work").join(".charj");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("hello.ci"), "module hello {}\n").unwrap();
        fs::write(cache.join("hello.cc"), "int x;\n").unwrap();

        let script = dir.path().join("fakecc");
        let log = dir.path().join("calls.log");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
                log.display(),
                body
            ),
        )
        .unwrap();

        Self {
            dir,
            stdout: SharedBuffer::new(),
            stderr: SharedBuffer::new(),
        }
    }

    fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    fn base(&self) -> PathBuf {
        self.work_dir().join(".charj").join("hello")
    }

    fn toolchain(&self, options: &str) -> ToolchainCommand {
        let script = self.dir.path().join("fakecc");
        ToolchainCommand::parse(&format!("sh {} {}", script.display(), options)).unwrap()
    }

    fn invoker(&self) -> Invoker {
        Invoker::new(self.toolchain(""), self.work_dir()).sinks(
            Sink::Buffer(self.stdout.clone()),
            Sink::Buffer(self.stderr.clone()),
        )
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }
}

/// Compiles `-c X.cc` to `X.o` in the current directory; everything else
/// succeeds silently.
const WELL_BEHAVED: &str = r#"
if [ "$1" = "-c" ]; then
    out=$(basename "$2" .cc).o
    echo "object for $2" > "$out"
fi
exit 0
"#;

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[test]
fn test_all_steps_succeed() {
    let fx = Fixture::new(WELL_BEHAVED);

    let outcome = fx.invoker().compile(&fx.base()).unwrap();

    assert!(outcome.is_success());
    assert_eq!(fx.calls(), vec!["hello.ci", "-c hello.cc"]);
    let object = fx.work_dir().join("hello.o");
    assert_eq!(
        outcome.status,
        ToolchainStatus::Succeeded {
            object: object.clone()
        }
    );
    assert_eq!(fs::read_to_string(&object).unwrap(), "object for hello.cc\n");
    assert!(!exists(&fx.base().with_extension("o")));
    assert_eq!(outcome.steps.len(), 3);
}

#[test]
fn test_relocation_overwrites_existing_object() {
    let fx = Fixture::new(WELL_BEHAVED);
    fs::write(fx.work_dir().join("hello.o"), "stale").unwrap();

    fx.invoker().compile(&fx.base()).unwrap();

    assert_eq!(
        fs::read_to_string(fx.work_dir().join("hello.o")).unwrap(),
        "object for hello.cc\n"
    );
}

#[test]
fn test_interface_failure_stops_pipeline() {
    let fx = Fixture::new(
        r#"
echo "hello.ci:1: syntax error" >&2
exit 3
"#,
    );

    let outcome = fx.invoker().compile(&fx.base()).unwrap();

    assert_eq!(fx.calls(), vec!["hello.ci"]);
    assert_eq!(outcome.steps.len(), 1);
    match outcome.status {
        ToolchainStatus::Failed { step, code, .. } => {
            assert_eq!(step, StepKind::CompileInterface);
            assert_eq!(code, Some(3));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(fx.stderr.to_string_lossy(), "hello.ci:1: syntax error\n");
    assert!(!exists(&fx.work_dir().join("hello.o")));
}

#[test]
fn test_implementation_failure_never_relocates() {
    let fx = Fixture::new(
        r#"
if [ "$1" = "-c" ]; then
    echo partial > hello.o
    exit 1
fi
exit 0
"#,
    );

    let outcome = fx.invoker().compile(&fx.base()).unwrap();

    assert_eq!(fx.calls(), vec!["hello.ci", "-c hello.cc"]);
    assert!(matches!(
        outcome.status,
        ToolchainStatus::Failed {
            step: StepKind::CompileImplementation,
            code: Some(1),
            ..
        }
    ));
    assert!(!exists(&fx.work_dir().join("hello.o")));
    // Nothing already produced is cleaned up.
    assert!(exists(&fx.base().with_extension("o")));
    assert!(exists(&fx.base().with_extension("ci")));
}

#[test]
fn test_missing_object_is_a_failure() {
    let fx = Fixture::new("exit 0");

    let outcome = fx.invoker().compile(&fx.base()).unwrap();

    match outcome.status {
        ToolchainStatus::Failed { step, reason, .. } => {
            assert_eq!(step, StepKind::CompileImplementation);
            assert!(reason.contains("hello.o"), "unexpected reason: {}", reason);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!exists(&fx.work_dir().join("hello.o")));
}

#[test]
fn test_large_output_on_both_streams_is_fully_relayed() {
    // 3 MiB on stderr first, then 2 MiB on stdout, with a pause between.
    // A parent that drained only one stream would deadlock on the other.
    let fx = Fixture::new(&format!(
        r#"
head -c 3145728 /dev/zero | tr '\0' 'e' >&2
sleep 0.2
head -c 2097152 /dev/zero | tr '\0' 'o'
{}
"#,
        WELL_BEHAVED
    ));

    let outcome = fx.invoker().compile(&fx.base()).unwrap();

    assert!(outcome.is_success());
    // Two compile steps, each writing the full payload.
    let stdout = fx.stdout.contents();
    let stderr = fx.stderr.contents();
    assert_eq!(stdout.len(), 2 * 2097152);
    assert_eq!(stderr.len(), 2 * 3145728);
    assert!(stdout.iter().all(|&b| b == b'o'));
    assert!(stderr.iter().all(|&b| b == b'e'));
}

#[test]
fn test_stream_order_is_preserved() {
    let fx = Fixture::new(&format!(
        r#"
i=0
while [ $i -lt 200 ]; do
    echo "out $i"
    echo "err $i" >&2
    i=$((i + 1))
done
{}
"#,
        WELL_BEHAVED
    ));

    fx.invoker().compile(&fx.base()).unwrap();

    let expected_out: String = (0..200).map(|i| format!("out {}\n", i)).collect();
    let expected_err: String = (0..200).map(|i| format!("err {}\n", i)).collect();
    assert_eq!(fx.stdout.to_string_lossy(), expected_out.repeat(2));
    assert_eq!(fx.stderr.to_string_lossy(), expected_err.repeat(2));
}

#[test]
fn test_timeout_kills_step() {
    let fx = Fixture::new("exec sleep 10");
    let started = Instant::now();

    let err = fx
        .invoker()
        .timeout(Some(Duration::from_millis(200)))
        .compile(&fx.base())
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(matches!(
        err,
        ToolchainError::TimedOut {
            step: StepKind::CompileInterface,
            ..
        }
    ));
    assert_eq!(fx.calls(), vec!["hello.ci"]);
}

#[test]
fn test_timeout_kills_what_the_step_forked() {
    // Without `exec` the shell forks `sleep`, which keeps both pipes open.
    let fx = Fixture::new("echo started\nsleep 10\nexit 0");
    let started = Instant::now();

    let err = fx
        .invoker()
        .timeout(Some(Duration::from_millis(200)))
        .compile(&fx.base())
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(matches!(
        err,
        ToolchainError::TimedOut {
            step: StepKind::CompileInterface,
            ..
        }
    ));
    assert_eq!(fx.stdout.to_string_lossy(), "started\n");
}

#[test]
fn test_prefix_options_come_first() {
    let fx = Fixture::new(
        r#"
if [ "$2" = "-c" ]; then
    echo obj > hello.o
fi
"#,
    );
    let outcome = Invoker::new(fx.toolchain("-O3"), fx.work_dir())
        .sinks(Sink::Buffer(SharedBuffer::new()), Sink::Buffer(SharedBuffer::new()))
        .compile(&fx.base())
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(fx.calls(), vec!["-O3 hello.ci", "-O3 -c hello.cc"]);
}
