#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[cfg(test)]
extern crate test_tmpdir;

mod cfg;
mod corpus;
mod error;
mod index;
mod reference_finder;
mod report;
mod walk;

use std::path::Path;

pub use cfg::{
    ReferenceFinderConfig, ReferenceFinderJSONConfig, TargetFilter, DEFAULT_EXTENSIONS,
    DEFAULT_REFERENCE_PREFIX, DEFAULT_TARGET_SUFFIXES,
};
pub use corpus::{Corpus, CorpusFile};
pub use error::{ConfigError, FinderError, ScanError, ScanWarning};
pub use reference_finder::ReferenceFinder;
pub use report::{ReferenceReport, ScanOutcome};

pub fn find_unreferenced_files(
    logger: impl logger::Logger,
    root: impl AsRef<Path>,
    config: ReferenceFinderJSONConfig,
) -> Result<ScanOutcome, FinderError> {
    let finder = ReferenceFinder::new_from_json_config(config)?;
    let outcome = finder.scan(logger, root)?;
    Ok(outcome)
}
