use std::path::Path;

use logger::Logger;

use crate::{
    cfg::{ReferenceFinderConfig, ReferenceFinderJSONConfig},
    corpus::CorpusFile,
    error::{ConfigError, ScanError},
    index::ReferenceIndex,
    report::{ReferenceReport, ScanOutcome},
    walk::walk_src_files,
};

// Finds source files that no other file appears to import.
//
// The check is textual: a target counts as referenced when another collected
// file has a line starting with the reference prefix ("import" by default)
// that contains the target's base name anywhere in it.
//
// To use, create a new ReferenceFinder from a config, then call `scan` with the
// project root.
#[derive(Debug, Clone)]
pub struct ReferenceFinder {
    config: ReferenceFinderConfig,
}

impl ReferenceFinder {
    pub fn new_from_json_config(
        json_config: ReferenceFinderJSONConfig,
    ) -> Result<Self, ConfigError> {
        let config = ReferenceFinderConfig::try_from(json_config)?;
        Ok(Self::new_from_cfg(config))
    }

    pub fn new_from_cfg(config: ReferenceFinderConfig) -> Self {
        Self { config }
    }

    /// Walks `root`, checks every target against the rest of the corpus and
    /// reports the targets with no reference.
    ///
    /// Only an invalid root fails the scan. Unreadable directories and files
    /// are logged through `logger` and recorded as warnings on the outcome.
    pub fn scan(
        &self,
        logger: impl Logger,
        root: impl AsRef<Path>,
    ) -> Result<ScanOutcome, ScanError> {
        let walked = walk_src_files(&logger, root.as_ref(), &self.config)?;
        let corpus = walked.corpus;
        let mut warnings = walked.warnings;

        if corpus.is_empty() {
            return Ok(ScanOutcome::EmptyCorpus {
                extensions: self.config.extensions_display(),
                warnings,
            });
        }

        let targets: Vec<&CorpusFile> = corpus
            .files
            .iter()
            .filter(|file| self.config.target_filter.accepts(&file.file_name))
            .collect();
        logger.log(format!(
            "Checking {} of {} files for references",
            targets.len(),
            corpus.len()
        ));

        let (index, read_warnings) =
            ReferenceIndex::build(&logger, &corpus, &targets, &self.config.reference_prefix);
        warnings.extend(read_warnings);

        let unreferenced_files = targets
            .iter()
            .filter(|target| !index.is_referenced(target))
            .map(|target| target.display_path())
            .collect::<Vec<_>>();
        logger.log(format!(
            "Done: {} unreferenced, {} warnings",
            unreferenced_files.len(),
            warnings.len()
        ));

        Ok(ScanOutcome::Report(ReferenceReport {
            unreferenced_files,
            targets_checked: targets.len(),
            warnings,
        }))
    }
}
