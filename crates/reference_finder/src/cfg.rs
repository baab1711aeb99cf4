use serde::Deserialize;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::ConfigError;

pub const DEFAULT_EXTENSIONS: &[&str] = &[".java"];
pub const DEFAULT_TARGET_SUFFIXES: &[&str] = &[".java", "Test.java"];
pub const DEFAULT_REFERENCE_PREFIX: &str = "import";

/// A JSON serializable proxy for the ReferenceFinderConfig struct
///
/// Every field is optional in the JSON file; missing fields fall back to the
/// same defaults the command line uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceFinderJSONConfig {
    // File extensions (including the leading dot) that make up the corpus
    pub extensions: Vec<String>,
    // Suffixes a file name must end with, all of them, to be checked as a target
    pub target_suffixes: Vec<String>,
    // Check every collected file as a target, ignoring target_suffixes
    pub all_targets: bool,
    // Token a line must start with to count as a reference
    pub reference_prefix: String,
    // Directories matching these globs (relative to the root) are not walked
    pub skipped_dirs: Vec<String>,
}

impl Default for ReferenceFinderJSONConfig {
    fn default() -> Self {
        Self {
            extensions: to_strings(DEFAULT_EXTENSIONS),
            target_suffixes: to_strings(DEFAULT_TARGET_SUFFIXES),
            all_targets: false,
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            skipped_dirs: Vec::new(),
        }
    }
}

impl ReferenceFinderJSONConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Decides which collected files get checked for incoming references.
#[derive(Clone)]
pub enum TargetFilter {
    /// Every collected file is a target.
    All,
    /// The file name must end with every one of these suffixes.
    RequireSuffixes(Vec<String>),
    /// Caller-supplied predicate over the file name.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl TargetFilter {
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        TargetFilter::Predicate(Arc::new(f))
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        match self {
            TargetFilter::All => true,
            TargetFilter::RequireSuffixes(suffixes) => {
                suffixes.iter().all(|suffix| file_name.ends_with(suffix.as_str()))
            }
            TargetFilter::Predicate(f) => f(file_name),
        }
    }
}

impl Default for TargetFilter {
    fn default() -> Self {
        TargetFilter::RequireSuffixes(to_strings(DEFAULT_TARGET_SUFFIXES))
    }
}

impl Debug for TargetFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetFilter::All => write!(f, "All"),
            TargetFilter::RequireSuffixes(suffixes) => {
                f.debug_tuple("RequireSuffixes").field(suffixes).finish()
            }
            TargetFilter::Predicate(_) => write!(f, "Predicate(<fn>)"),
        }
    }
}

/// Configuration for the reference finder
#[derive(Debug, Clone)]
pub struct ReferenceFinderConfig {
    // Lowercased extensions; a file is collected if its lowercased name ends with one
    pub extensions: Vec<String>,
    pub target_filter: TargetFilter,
    pub reference_prefix: String,
    pub skipped_dirs: Arc<Vec<glob::Pattern>>,
}

impl Default for ReferenceFinderConfig {
    fn default() -> Self {
        Self {
            extensions: to_strings(DEFAULT_EXTENSIONS),
            target_filter: TargetFilter::default(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            skipped_dirs: Arc::new(Vec::new()),
        }
    }
}

impl ReferenceFinderConfig {
    pub fn has_extension(&self, lowercased_file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| lowercased_file_name.ends_with(ext.as_str()))
    }

    pub fn is_skipped_dir(&self, relative_slash_path: &str) -> bool {
        self.skipped_dirs
            .iter()
            .any(|pattern| pattern.matches(relative_slash_path))
    }

    /// Renders the extension list the way the empty-corpus message shows it,
    /// e.g. `[.java, .kt]`.
    pub fn extensions_display(&self) -> String {
        format!("[{}]", self.extensions.join(", "))
    }
}

impl TryFrom<ReferenceFinderJSONConfig> for ReferenceFinderConfig {
    type Error = ConfigError;
    fn try_from(value: ReferenceFinderJSONConfig) -> Result<Self, Self::Error> {
        if value.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if value.reference_prefix.is_empty() {
            return Err(ConfigError::EmptyReferencePrefix);
        }

        let skipped_dirs = value
            .skipped_dirs
            .iter()
            .map(|s| {
                glob::Pattern::new(s).map_err(|source| ConfigError::InvalidGlob {
                    pattern: s.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<glob::Pattern>, _>>()?;

        let target_filter = if value.all_targets {
            TargetFilter::All
        } else {
            TargetFilter::RequireSuffixes(value.target_suffixes)
        };

        Ok(ReferenceFinderConfig {
            extensions: value
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            target_filter,
            reference_prefix: value.reference_prefix,
            skipped_dirs: Arc::new(skipped_dirs),
        })
    }
}

/// Resolves the directory to scan into a clean absolute path without
/// touching the filesystem beyond reading the working directory.
pub fn absolute_root(root: &Path) -> std::io::Result<PathBuf> {
    use path_clean::PathClean;
    if root.is_absolute() {
        Ok(root.to_path_buf().clean())
    } else {
        Ok(std::env::current_dir()?.join(root).clean())
    }
}
