use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use logger::Logger;

use crate::{
    corpus::{Corpus, CorpusFile},
    error::ScanWarning,
};

/// Maps target base names to the corpus files holding at least one reference
/// line for that name.
///
/// Built in a single pass where each corpus file is read at most once, so
/// checking a target is a lookup instead of a rescan of the whole corpus.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    hits: HashMap<String, HashSet<PathBuf>>,
}

impl ReferenceIndex {
    pub fn build(
        logger: impl Logger,
        corpus: &Corpus,
        targets: &[&CorpusFile],
        reference_prefix: &str,
    ) -> (Self, Vec<ScanWarning>) {
        let mut index = ReferenceIndex::default();
        let mut warnings = Vec::new();

        let names: Vec<&str> = targets
            .iter()
            .map(|target| target.base_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if names.is_empty() {
            return (index, warnings);
        }

        // a file's own hits only matter for other targets
        let sole_target = match targets {
            [only] => Some(only.absolute_path.as_path()),
            _ => None,
        };

        for file in corpus.files.iter() {
            if sole_target == Some(file.absolute_path.as_path()) {
                continue;
            }

            let (found, read_err) =
                scan_reference_lines(&file.absolute_path, &names, reference_prefix);
            for (name, hit) in names.iter().zip(found) {
                if hit {
                    index
                        .hits
                        .entry(name.to_string())
                        .or_default()
                        .insert(file.absolute_path.clone());
                }
            }

            if let Some(source) = read_err {
                let warning = ScanWarning::FileRead {
                    path: file.absolute_path.clone(),
                    source,
                };
                logger.error(&warning);
                warnings.push(warning);
            }
        }

        (index, warnings)
    }

    /// True if some file other than the target itself references the
    /// target's base name.
    pub fn is_referenced(&self, target: &CorpusFile) -> bool {
        self.referencing_files(&target.base_name)
            .any(|path| path != target.absolute_path)
    }

    pub fn referencing_files<'s>(&'s self, base_name: &str) -> impl Iterator<Item = &'s Path> {
        self.hits
            .get(base_name)
            .into_iter()
            .flat_map(|paths| paths.iter().map(|p| p.as_path()))
    }
}

/// Reads `path` line by line and reports, per name, whether any line starting
/// with `reference_prefix` contains it.
///
/// Stops as soon as every name has been seen. On a read error the hits found
/// so far are kept and the error is returned alongside them.
fn scan_reference_lines(
    path: &Path,
    names: &[&str],
    reference_prefix: &str,
) -> (Vec<bool>, Option<std::io::Error>) {
    let mut found = vec![false; names.len()];
    let result = (|| -> std::io::Result<()> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut remaining = names.len();
        let mut buf = Vec::new();
        while remaining > 0 {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // '\n', "\r\n" and a lone '\r' all end a line
            let content = buf.strip_suffix(b"\n").unwrap_or(&buf);
            for segment in content.split(|b| *b == b'\r') {
                if !segment.starts_with(reference_prefix.as_bytes()) {
                    continue;
                }
                let line = String::from_utf8_lossy(segment);
                for (name, hit) in names.iter().zip(found.iter_mut()) {
                    if !*hit && line.contains(name) {
                        *hit = true;
                        remaining -= 1;
                    }
                }
                if remaining == 0 {
                    break;
                }
            }
        }
        Ok(())
    })();

    (found, result.err())
}
