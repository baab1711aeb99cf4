use std::path::Path;
use std::sync::Arc;

use jwalk::{Parallelism, WalkDir};
use logger::{debug_logf, Logger};
use path_slash::PathBufExt;

use crate::{
    cfg::{absolute_root, ReferenceFinderConfig},
    corpus::{Corpus, CorpusFile},
    error::{ScanError, ScanWarning},
};

#[derive(Debug)]
pub struct WalkFileResult {
    pub corpus: Corpus,
    // directories that could not be read; their subtrees contribute no files
    pub warnings: Vec<ScanWarning>,
}

/// Walks the project root and collects every file whose lowercased name ends
/// with one of the configured extensions.
///
/// The walk is serial and sorted by file name so that repeated runs over the
/// same tree collect files in the same order. Symlinks are followed, so a
/// linked directory contributes its files under the link's path.
pub fn walk_src_files(
    logger: impl Logger,
    root: &Path,
    config: &ReferenceFinderConfig,
) -> Result<WalkFileResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot(root.display().to_string()));
    }
    let abs_root = absolute_root(root).map_err(ScanError::CurrentDir)?;

    let walk_root: Arc<Path> = Arc::from(abs_root.as_path());
    let skip_config = config.clone();
    let walk_dir = WalkDir::new(&abs_root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false)
        // symlinked directories are entered like real ones
        .follow_links(true)
        .process_read_dir(move |_depth, _path, _read_dir_state, children| {
            if skip_config.skipped_dirs.is_empty() {
                return;
            }
            children.retain(|dir_entry_result| match dir_entry_result {
                Ok(dir_entry) => {
                    !dir_entry.file_type().is_dir()
                        || !is_skipped(&walk_root, &dir_entry.path(), &skip_config)
                }
                // keep errors so they surface in the iterator and get logged
                Err(_) => true,
            });
        });

    let mut files = Vec::new();
    let mut warnings = Vec::new();
    for entry in walk_dir {
        let dir_entry = match entry {
            Ok(dir_entry) => dir_entry,
            Err(e) => {
                let warning = ScanWarning::Walk(e);
                logger.error(&warning);
                warnings.push(warning);
                continue;
            }
        };

        if dir_entry.file_type().is_dir() {
            continue;
        }

        let lowercased = dir_entry.file_name().to_string_lossy().to_lowercase();
        if !config.has_extension(&lowercased) {
            continue;
        }

        files.push(CorpusFile::new(&abs_root, dir_entry.path()));
    }

    debug_logf!(
        logger,
        "collected {} files under {}",
        files.len(),
        abs_root.display()
    );

    Ok(WalkFileResult {
        corpus: Corpus {
            root: abs_root,
            files,
        },
        warnings,
    })
}

fn is_skipped(root: &Path, dir_path: &Path, config: &ReferenceFinderConfig) -> bool {
    let relative = match pathdiff::diff_paths(dir_path, root) {
        Some(relative) => relative,
        None => return false,
    };
    let slashed = relative.to_slash_lossy();
    config.is_skipped_dir(slashed.as_ref())
}

#[cfg(test)]
mod test {
    use logger::VecLogger;
    use test_tmpdir::test_tmpdir;

    use super::walk_src_files;
    use crate::{
        cfg::{ReferenceFinderConfig, ReferenceFinderJSONConfig},
        error::ScanError,
    };

    fn collected(config: &ReferenceFinderConfig, tmpdir: &test_tmpdir::TmpDir) -> Vec<String> {
        let logger = VecLogger::new();
        let result = walk_src_files(&logger, tmpdir.root(), config).unwrap();
        assert!(result.warnings.is_empty());
        result
            .corpus
            .files
            .iter()
            .map(|file| file.display_path())
            .collect()
    }

    #[test]
    fn test_collects_matching_extensions_recursively() {
        let tmpdir = test_tmpdir!(
            "src/main/App.java" => "class App {}",
            "src/main/Helper.JAVA" => "class Helper {}",
            "src/main/notes.txt" => "not java",
            "src/test/AppTest.java" => "import App;",
            ".hidden/Secret.java" => "class Secret {}"
        );

        assert_eq!(
            collected(&ReferenceFinderConfig::default(), &tmpdir),
            vec![
                ".hidden/Secret.java",
                "src/main/App.java",
                "src/main/Helper.JAVA",
                "src/test/AppTest.java",
            ]
        );
    }

    #[test]
    fn test_directories_named_like_sources_are_descended() {
        let tmpdir = test_tmpdir!(
            "weird.java/Inner.java" => "class Inner {}"
        );
        assert_eq!(
            collected(&ReferenceFinderConfig::default(), &tmpdir),
            vec!["weird.java/Inner.java"]
        );
    }

    #[test]
    fn test_skipped_dirs_are_pruned() {
        let tmpdir = test_tmpdir!(
            "app/src/Keep.java" => "",
            "app/build/Generated.java" => "",
            "vendor/lib/Dep.java" => ""
        );
        let config = ReferenceFinderConfig::try_from(ReferenceFinderJSONConfig {
            skipped_dirs: vec!["**/build".to_string(), "vendor".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(collected(&config, &tmpdir), vec!["app/src/Keep.java"]);
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        let tmpdir = test_tmpdir!(
            "Plain.java" => ""
        );
        let logger = VecLogger::new();
        let config = ReferenceFinderConfig::default();

        let as_file = walk_src_files(&logger, &tmpdir.root_join("Plain.java"), &config);
        assert!(matches!(as_file, Err(ScanError::InvalidRoot(_))));

        let missing = tmpdir.root_join("does-not-exist");
        match walk_src_files(&logger, &missing, &config) {
            Err(e) => assert_eq!(
                e.to_string(),
                format!("Invalid directory: {}", missing.display())
            ),
            Ok(_) => panic!("expected an invalid root error"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_followed() {
        let tmpdir = test_tmpdir!(
            "real/Foo.java" => "class Foo {}\n",
            "real/Bar.java" => "import Foo;\n"
        );
        let project = tmpdir.mkdir("project").unwrap();
        std::os::unix::fs::symlink("../real", project.join("linked")).unwrap();

        let logger = VecLogger::new();
        let result =
            walk_src_files(&logger, &project, &ReferenceFinderConfig::default()).unwrap();
        assert!(result.warnings.is_empty());
        let paths: Vec<String> = result
            .corpus
            .files
            .iter()
            .map(|file| file.display_path())
            .collect();
        assert_eq!(paths, vec!["linked/Bar.java", "linked/Foo.java"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_logged_and_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmpdir = test_tmpdir!(
            "Open.java" => "class Open {}\n",
            "locked/Hidden.java" => "import Open;\n",
            "zz/After.java" => "class After {}\n"
        );
        let locked = tmpdir.root_join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read_dir(&locked).is_ok() {
            // running as root, permissions are not enforced
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let logger = VecLogger::new();
        let result = walk_src_files(&logger, tmpdir.root(), &ReferenceFinderConfig::default());
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        let result = result.unwrap();

        let paths: Vec<String> = result
            .corpus
            .files
            .iter()
            .map(|file| file.display_path())
            .collect();
        assert_eq!(paths, vec!["Open.java", "zz/After.java"]);
        assert_eq!(result.warnings.len(), 1);
        let errors = logger.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("locked"));
    }
}
