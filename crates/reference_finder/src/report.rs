use std::fmt::Display;

use crate::error::ScanWarning;

// Report of the targets nothing else references
#[derive(Debug, Default)]
pub struct ReferenceReport {
    // slash-separated paths relative to the project root, in walk order
    pub unreferenced_files: Vec<String>,
    // number of files that passed the target filter
    pub targets_checked: usize,
    // recoverable read failures hit while walking or scanning
    pub warnings: Vec<ScanWarning>,
}

impl Display for ReferenceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for file_path in self.unreferenced_files.iter() {
            writeln!(f, "No imports found for: {}", file_path)?;
        }
        Ok(())
    }
}

/// Result of a completed scan.
#[derive(Debug)]
pub enum ScanOutcome {
    /// No file under the root had a configured extension. Not an error, but
    /// nothing was checked.
    EmptyCorpus {
        // e.g. "[.java]"
        extensions: String,
        warnings: Vec<ScanWarning>,
    },
    Report(ReferenceReport),
}

impl ScanOutcome {
    pub fn report(&self) -> Option<&ReferenceReport> {
        match self {
            ScanOutcome::Report(report) => Some(report),
            ScanOutcome::EmptyCorpus { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        match self {
            ScanOutcome::EmptyCorpus { warnings, .. } => warnings,
            ScanOutcome::Report(report) => &report.warnings,
        }
    }
}

impl Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOutcome::EmptyCorpus { extensions, .. } => writeln!(
                f,
                "No files with extensions {} found in the project.",
                extensions
            ),
            ScanOutcome::Report(report) => write!(f, "{}", report),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ReferenceReport, ScanOutcome};

    #[test]
    fn test_report_lines() {
        let report = ReferenceReport {
            unreferenced_files: vec!["src/FooTest.java".to_string(), "BarTest.java".to_string()],
            targets_checked: 3,
            warnings: vec![],
        };
        assert_eq!(
            report.to_string(),
            "No imports found for: src/FooTest.java\nNo imports found for: BarTest.java\n"
        );
    }

    #[test]
    fn test_fully_referenced_report_is_silent() {
        let outcome = ScanOutcome::Report(ReferenceReport {
            targets_checked: 2,
            ..Default::default()
        });
        assert_eq!(outcome.to_string(), "");
    }

    #[test]
    fn test_empty_corpus_message() {
        let outcome = ScanOutcome::EmptyCorpus {
            extensions: "[.java]".to_string(),
            warnings: vec![],
        };
        assert_eq!(
            outcome.to_string(),
            "No files with extensions [.java] found in the project.\n"
        );
        assert!(outcome.report().is_none());
    }
}
