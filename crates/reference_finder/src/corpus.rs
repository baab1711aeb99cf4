use std::path::{Path, PathBuf};

use path_slash::PathBufExt;

/// A collected source file. Created during the walk and read-only afterwards.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CorpusFile {
    pub absolute_path: PathBuf,
    // Path relative to the project root
    pub relative_path: PathBuf,
    pub file_name: String,
    // File name up to (not including) the last '.'
    pub base_name: String,
}

impl CorpusFile {
    pub fn new(root: &Path, absolute_path: PathBuf) -> Self {
        let file_name = absolute_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let base_name = match file_name.rsplit_once('.') {
            Some((base, _ext)) => base.to_string(),
            None => file_name.clone(),
        };
        let relative_path =
            pathdiff::diff_paths(&absolute_path, root).unwrap_or_else(|| absolute_path.clone());

        Self {
            absolute_path,
            relative_path,
            file_name,
            base_name,
        }
    }

    /// The relative path with forward slashes, as shown in reports.
    pub fn display_path(&self) -> String {
        self.relative_path.to_slash_lossy().to_string()
    }
}

/// Every collected file under a project root, in walk order.
#[derive(Debug, Default)]
pub struct Corpus {
    pub root: PathBuf,
    pub files: Vec<CorpusFile>,
}

impl Corpus {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
