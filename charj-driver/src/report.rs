use std::fmt;

use charj_core::{PassKind, TranslationPass};

const RULE_WIDTH: usize = 35;

/// Both generated bodies, for a human to read.
///
/// Rendered as:
///
/// ```text
/// -----CI----------------------------
/// <interface>
/// -----CC----------------------------
/// <implementation>
/// -----------------------------------
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    pub interface: String,
    pub implementation: String,
}

impl TranslationReport {
    pub(crate) fn from_passes(passes: &[TranslationPass]) -> Self {
        let text = |kind: PassKind| {
            passes
                .iter()
                .find(|p| p.kind == kind)
                .map(|p| p.text.clone())
                .unwrap_or_default()
        };
        Self {
            interface: text(PassKind::Interface),
            implementation: text(PassKind::Implementation),
        }
    }
}

fn header(kind: PassKind) -> String {
    format!("{:-<width$}", format!("-----{}", kind.label()), width = RULE_WIDTH)
}

impl fmt::Display for TranslationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", header(PassKind::Interface))?;
        write!(f, "{}", self.interface)?;
        writeln!(f, "{}", header(PassKind::Implementation))?;
        write!(f, "{}", self.implementation)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_layout() {
        let report = TranslationReport::from_passes(&[
            TranslationPass::new(PassKind::Interface, "module a {}\n"),
            TranslationPass::new(PassKind::Implementation, "int a;\n"),
        ]);

        assert_eq!(
            report.to_string(),
            "-----CI----------------------------\n\
             module a {}\n\
             -----CC----------------------------\n\
             int a;\n\
             -----------------------------------\n"
        );
    }
}
