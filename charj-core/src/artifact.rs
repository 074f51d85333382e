use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{PassKind, paths};

/// Failure to persist an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create build cache directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write artifact '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove build cache directory '{}'", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// The path the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            WriteError::CreateDir { path, .. }
            | WriteError::Write { path, .. }
            | WriteError::Remove { path, .. } => path,
        }
    }
}

/// A generated file materialized in the build cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: PassKind,
    pub path: PathBuf,
    pub content: String,
}

/// Writes generated text into the hidden build-cache directory.
///
/// Artifacts are always overwritten; nothing is compared with what is
/// already on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter {
    verbose: bool,
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce every created artifact at info level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Write `content` as the `kind` artifact of `source`.
    pub fn write(
        &self,
        source: &Path,
        content: &str,
        kind: PassKind,
    ) -> Result<Artifact, WriteError> {
        let dir = paths::cache_dir(source);
        std::fs::create_dir_all(&dir).map_err(|e| WriteError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;

        let path = paths::artifact_path(source, kind);
        if self.verbose {
            info!(path = %path.display(), "create");
        } else {
            debug!(path = %path.display(), %kind, "create");
        }

        std::fs::write(&path, content).map_err(|e| WriteError::Write {
            path: path.clone(),
            source: e,
        })?;

        Ok(Artifact {
            kind,
            path,
            content: content.to_string(),
        })
    }

    /// Remove the build-cache directory of `source` and everything in it.
    ///
    /// Returns the removed directory, or `None` if there was nothing to
    /// remove.
    pub fn clean(&self, source: &Path) -> Result<Option<PathBuf>, WriteError> {
        self.clean_dir(paths::cache_dir(source))
    }

    /// Remove a build-cache directory given directly.
    pub fn clean_dir(&self, dir: PathBuf) -> Result<Option<PathBuf>, WriteError> {
        match std::fs::remove_dir_all(&dir) {
            Ok(()) => {
                if self.verbose {
                    info!(path = %dir.display(), "remove");
                }
                Ok(Some(dir))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WriteError::Remove {
                path: dir,
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_cache_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("hello.cj");

        let artifact = ArtifactWriter::new()
            .write(&source, "module hello {}\n", PassKind::Interface)
            .unwrap();

        assert_eq!(artifact.path, temp.path().join(".charj").join("hello.ci"));
        assert_eq!(
            fs::read_to_string(&artifact.path).unwrap(),
            "module hello {}\n"
        );
    }

    #[test]
    fn test_write_with_existing_cache_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".charj")).unwrap();
        let source = temp.path().join("hello.cj");

        let artifact = ArtifactWriter::new()
            .write(&source, "body", PassKind::Implementation)
            .unwrap();

        assert_eq!(artifact.path, temp.path().join(".charj").join("hello.cc"));
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("hello.cj");
        let writer = ArtifactWriter::new();

        writer.write(&source, "first", PassKind::Interface).unwrap();
        let artifact = writer.write(&source, "second", PassKind::Interface).unwrap();

        assert_eq!(fs::read_to_string(&artifact.path).unwrap(), "second");
    }

    #[test]
    fn test_write_fails_when_cache_path_is_a_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".charj"), "not a directory").unwrap();
        let source = temp.path().join("hello.cj");

        let err = ArtifactWriter::new()
            .write(&source, "x", PassKind::Interface)
            .unwrap_err();

        assert!(matches!(err, WriteError::CreateDir { .. }));
        assert_eq!(err.path(), temp.path().join(".charj"));
    }

    #[test]
    fn test_clean_removes_cache_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("hello.cj");
        let writer = ArtifactWriter::new();
        writer.write(&source, "x", PassKind::Interface).unwrap();

        let removed = writer.clean(&source).unwrap();

        assert_eq!(removed, Some(temp.path().join(".charj")));
        assert!(!temp.path().join(".charj").exists());
    }

    #[test]
    fn test_clean_without_cache_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("hello.cj");

        assert_eq!(ArtifactWriter::new().clean(&source).unwrap(), None);
    }
}
