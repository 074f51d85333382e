//! Driver configuration.
//!
//! A [`Config`] is built once per invocation and never changes while the
//! driver runs. Values come from an optional `charj.toml` ([`ConfigFile`])
//! and are then overridden by whoever builds the config, usually the
//! command line.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use charj_toolchain::{DEFAULT_TOOLCHAIN, Sink};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "charj.toml";

/// Immutable settings for one translation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toolchain executable plus leading options, e.g. `charmc -O3`.
    pub toolchain: String,
    pub debug: bool,
    /// Echo created artifacts and executed commands.
    pub verbose: bool,
    /// Kill a toolchain step that runs longer than this.
    pub timeout: Option<Duration>,
    /// Run the toolchain after writing the artifacts.
    pub compile: bool,
    /// Directory the finished object is moved to.
    pub work_dir: PathBuf,
    /// Where the toolchain's standard output goes.
    pub output: Sink,
    /// Where diagnostics and the toolchain's standard error go.
    pub errors: Sink,
}

impl Config {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
            debug: false,
            verbose: false,
            timeout: None,
            compile: true,
            work_dir: work_dir.into(),
            output: Sink::Stdout,
            errors: Sink::Stderr,
        }
    }

    /// A config whose work directory is the process's current directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn compile(mut self, compile: bool) -> Self {
        self.compile = compile;
        self
    }

    pub fn sinks(mut self, output: Sink, errors: Sink) -> Self {
        self.output = output;
        self.errors = errors;
        self
    }

    /// Take every value the file sets.
    pub fn with_file(mut self, file: &ConfigFile) -> Self {
        if let Some(toolchain) = &file.toolchain {
            self.toolchain = toolchain.clone();
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
        }
        if let Some(secs) = file.timeout {
            self.timeout = Some(Duration::from_secs(secs));
        }
        self
    }
}

/// Contents of `charj.toml`. Every key is optional.
///
/// ```toml
/// toolchain = "charmc -O3"
/// verbose = true
/// timeout = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub toolchain: Option<String>,
    pub debug: Option<bool>,
    pub verbose: Option<bool>,
    /// Seconds.
    pub timeout: Option<u64>,
}

impl ConfigFile {
    /// Read and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Box<ConfigError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// `charj.toml` in `dir`, if there is one.
    pub fn discover(dir: &Path) -> Result<Option<Self>, Box<ConfigError>> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse config text; `filename` is only used in error reports.
    pub fn parse(content: &str, filename: &str) -> Result<Self, Box<ConfigError>> {
        toml::from_str(content).map_err(|e| {
            let span = e.span().map(SourceSpan::from);
            Box::new(ConfigError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span,
                source: e,
            })
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(charj::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", CONFIG_FILE)]
    #[diagnostic(
        code(charj::config::parse),
        help("known keys are: toolchain, debug, verbose, timeout")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("/work");
        assert_eq!(config.toolchain, "charmc");
        assert!(config.compile);
        assert!(!config.verbose);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = ConfigFile::parse(
            r#"
            toolchain = "charmc -O3"
            verbose = true
            timeout = 90
            "#,
            "charj.toml",
        )
        .unwrap();

        let config = Config::new("/work").with_file(&file);

        assert_eq!(config.toolchain, "charmc -O3");
        assert!(config.verbose);
        assert!(!config.debug);
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_later_builder_calls_win() {
        let file = ConfigFile {
            toolchain: Some("charmc".into()),
            ..Default::default()
        };
        let config = Config::new("/work").with_file(&file).toolchain("mycc");
        assert_eq!(config.toolchain, "mycc");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ConfigFile::parse("toolchian = \"charmc\"\n", "charj.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_discover_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(ConfigFile::discover(temp.path()).unwrap(), None);
    }
}
