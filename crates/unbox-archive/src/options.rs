use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::entry::UnsupportedKind;
use crate::format::Compression;

/// What to do with entries that are neither regular files nor directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Log a warning, report the entry as skipped and carry on.
    #[default]
    Skip,
    /// Abort the extraction.
    Fail,
}

/// Per-file digest computed while the file is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HashStrategy {
    #[default]
    None,
    Sha256,
}

/// Observable extraction events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    DirectoryCreated { path: PathBuf },
    FileExtracted { path: PathBuf, bytes: u64 },
    EntrySkipped { name: String, kind: UnsupportedKind },
    Completed { entries: usize, total_bytes: u64 },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryCreated { path } => write!(f, "Creating directory {}", path.display()),
            Self::FileExtracted { path, .. } => write!(f, "Extracting file {}", path.display()),
            Self::EntrySkipped { name, kind } => write!(f, "Skipping {kind} {name}"),
            Self::Completed {
                entries,
                total_bytes,
            } => write!(f, "Extracted {entries} entries ({total_bytes} bytes)"),
        }
    }
}

pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

#[derive(Clone)]
pub struct ExtractOptions {
    /// Remove the decompressed intermediate container when done.
    pub cleanup: bool,
    pub compression: Compression,
    pub unsupported: UnsupportedPolicy,
    pub hash_strategy: HashStrategy,
    pub on_progress: Option<ProgressCallback>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            cleanup: true,
            compression: Compression::default(),
            unsupported: UnsupportedPolicy::default(),
            hash_strategy: HashStrategy::default(),
            on_progress: None,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("cleanup", &self.cleanup)
            .field("compression", &self.compression)
            .field("unsupported", &self.unsupported)
            .field("hash_strategy", &self.hash_strategy)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl ExtractOptions {
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    pub fn hash_strategy(mut self, strategy: HashStrategy) -> Self {
        self.hash_strategy = strategy;
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(callback) = &self.on_progress {
            callback(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn extract_options_default() {
        let options = ExtractOptions::default();
        assert!(options.cleanup);
        assert_eq!(options.compression, Compression::Auto);
        assert_eq!(options.unsupported, UnsupportedPolicy::Skip);
        assert_eq!(options.hash_strategy, HashStrategy::None);
        assert!(options.on_progress.is_none());
    }

    #[test]
    fn extract_options_builder_pattern() {
        let options = ExtractOptions::default()
            .cleanup(false)
            .compression(Compression::Gzip)
            .unsupported(UnsupportedPolicy::Fail)
            .hash_strategy(HashStrategy::Sha256);

        assert!(!options.cleanup);
        assert_eq!(options.compression, Compression::Gzip);
        assert_eq!(options.unsupported, UnsupportedPolicy::Fail);
        assert_eq!(options.hash_strategy, HashStrategy::Sha256);
    }

    #[test]
    fn progress_callback_receives_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let options = ExtractOptions::default().on_progress(Arc::new(move |p: Progress| {
            sink.lock().unwrap().push(p);
        }));

        options.report(Progress::DirectoryCreated {
            path: PathBuf::from("lib/data"),
        });
        options.report(Progress::Completed {
            entries: 1,
            total_bytes: 0,
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].to_string().starts_with("Creating directory "));
        assert!(matches!(seen[1], Progress::Completed { entries: 1, .. }));
    }
}
