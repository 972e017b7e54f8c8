use std::io;
use std::path::PathBuf;

/// Category of an extraction failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Decompression,
    ContainerFormat,
    PathTraversal,
    Filesystem,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("target directory does not exist: '{path}'")]
    TargetMissing { path: PathBuf },

    #[error("failed to decompress '{path}': {source}")]
    Decompression {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed container '{path}': {source}")]
    Container {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("entry '{entry}' is truncated: expected {expected} bytes, got {actual}")]
    TruncatedEntry {
        entry:    String,
        expected: u64,
        actual:   u64,
    },

    #[error("entry name is not usable: {0:?}")]
    InvalidEntryName(String),

    #[error("path traversal detected: entry '{entry}' escapes '{root}'")]
    PathTraversal { entry: String, root: PathBuf },

    #[error("unsupported entry type {kind} for '{entry}'")]
    UnsupportedEntry { entry: String, kind: String },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreationFailed {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove intermediate file '{path}': {source}")]
    CleanupFailed {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetMissing { .. } => ErrorKind::Configuration,
            Self::Decompression { .. } => ErrorKind::Decompression,
            Self::Container { .. }
            | Self::TruncatedEntry { .. }
            | Self::InvalidEntryName(_)
            | Self::UnsupportedEntry { .. } => ErrorKind::ContainerFormat,
            Self::PathTraversal { .. } => ErrorKind::PathTraversal,
            Self::DirectoryCreationFailed { .. }
            | Self::ExtractionFailed { .. }
            | Self::CleanupFailed { .. }
            | Self::Io(_) => ErrorKind::Filesystem,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
