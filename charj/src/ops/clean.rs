//! Clean operation - remove a build cache.

use std::path::Path;

use charj_core::{ArtifactWriter, paths};
use eyre::{Context, Result};

use crate::reports::CleanReport;

/// Remove the build cache of `path`, a source file or the directory that
/// holds the cache.
pub fn clean(path: &Path, verbose: bool) -> Result<CleanReport> {
    let cache_dir = if path.is_dir() {
        path.join(paths::CACHE_DIR)
    } else {
        paths::cache_dir(path)
    };

    let removed = ArtifactWriter::new()
        .verbose(verbose)
        .clean_dir(cache_dir.clone())
        .wrap_err("Failed to remove the build cache")?;

    Ok(CleanReport {
        cache_dir,
        removed: removed.is_some(),
    })
}
