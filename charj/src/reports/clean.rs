//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from removing a build cache.
#[derive(Debug)]
pub struct CleanReport {
    pub cache_dir: PathBuf,
    /// False if there was no cache to remove.
    pub removed: bool,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.removed {
            out.section("Removed");
            out.removed_item(&self.cache_dir.display().to_string());
        } else {
            out.line(&format!("No build cache at {}", self.cache_dir.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::TextOutput;

    #[test]
    fn test_render_nothing_to_remove() {
        let report = CleanReport {
            cache_dir: "src/.charj".into(),
            removed: false,
        };

        let mut out = TextOutput::default();
        report.render(&mut out);

        assert_eq!(out.0, "No build cache at src/.charj\n");
    }
}
