extern crate path_slash;

use path_slash::PathBufExt;
use std::{
    fs::File,
    io::{Error, Write},
    path::{Path, PathBuf},
};

/// A temporary project tree that is deleted when dropped.
pub struct TmpDir {
    // deletes the directory on drop
    _tmp_root: tempfile::TempDir,
    canonical_root: PathBuf,
}

/// Builds a TmpDir from `"relative/path" => "content"` pairs.
///
/// Paths use forward slashes regardless of platform.
#[macro_export]
macro_rules! test_tmpdir(
    { $($key:expr => $value:expr),* $(,)? } => {
        {
            use test_tmpdir::TmpDir;
            let entries: Vec<(&str, &[u8])> = vec![
                $(($key, AsRef::<[u8]>::as_ref($value)),)*
            ];
            TmpDir::new_with_content(&entries)
        }
    };
);

impl Default for TmpDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TmpDir {
    pub fn new() -> TmpDir {
        let root = tempfile::tempdir().unwrap();
        let canonical_root = std::fs::canonicalize(&root).unwrap();
        TmpDir {
            _tmp_root: root,
            canonical_root,
        }
    }

    pub fn new_with_content(content: &[(&str, &[u8])]) -> TmpDir {
        let out = Self::new();
        for (path, bytes) in content {
            out.write(path, bytes).unwrap();
        }
        out
    }

    /// Writes a file, creating any missing parent directories.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) -> Result<PathBuf, Error> {
        let full_path = self.root_join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&full_path)?;
        file.write_all(content.as_ref())?;
        Ok(full_path)
    }

    /// Creates an empty directory (and its parents).
    pub fn mkdir(&self, path: &str) -> Result<PathBuf, Error> {
        let full_path = self.root_join(path);
        std::fs::create_dir_all(&full_path)?;
        Ok(full_path)
    }

    pub fn root(&self) -> &Path {
        &self.canonical_root
    }

    pub fn root_join<S: AsRef<str>>(&self, other: S) -> PathBuf {
        self.canonical_root.join(PathBuf::from_slash(other))
    }
}
