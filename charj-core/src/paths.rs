//! Path constants and artifact path derivation.
//!
//! Every path the translator touches inside the build cache is computed
//! here, so the writer, the toolchain invoker and `charjc clean` agree on
//! the layout.

use std::path::{Path, PathBuf};

use crate::PassKind;

/// Hidden build-cache directory, created next to the source file.
pub const CACHE_DIR: &str = ".charj";

/// Extension of source files.
pub const SOURCE_EXTENSION: &str = "cj";

/// Extension of the interface artifact.
pub const INTERFACE_EXTENSION: &str = "ci";

/// Extension of the implementation artifact.
pub const IMPLEMENTATION_EXTENSION: &str = "cc";

/// Extension of the object produced by compiling the implementation.
pub const OBJECT_EXTENSION: &str = "o";

/// Directory holding the source file; `.` for a bare file name.
pub fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `<source dir>/.charj`
pub fn cache_dir(source: &Path) -> PathBuf {
    source_dir(source).join(CACHE_DIR)
}

/// Source file name without its extension.
pub fn stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<source dir>/.charj/<stem>`, the path every artifact extends.
pub fn base_path(source: &Path) -> PathBuf {
    cache_dir(source).join(stem(source))
}

/// Path of the artifact a pass writes.
pub fn artifact_path(source: &Path, kind: PassKind) -> PathBuf {
    with_extension(&base_path(source), kind.extension())
}

/// Append an extension to a base path.
///
/// Unlike [`Path::with_extension`] this never replaces part of a stem that
/// itself contains a dot.
pub fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
