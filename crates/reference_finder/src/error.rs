use std::path::PathBuf;

use thiserror::Error;

/// Problems with the finder configuration. These are detected before any
/// file is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid skippedDirs pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("at least one file extension must be configured")]
    NoExtensions,
    #[error("referencePrefix must not be empty")]
    EmptyReferencePrefix,
}

/// Errors that end a scan before any reference checking happens.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid directory: {0}")]
    InvalidRoot(String),
    #[error("could not resolve the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Recoverable per-path failures. The scan logs these, records them on the
/// report and carries on as if the path held no files or no references.
#[derive(Error, Debug)]
pub enum ScanWarning {
    #[error("Error walking directory tree: {0}")]
    Walk(#[source] jwalk::Error),
    #[error("Error reading file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for the one-call entry point.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}
