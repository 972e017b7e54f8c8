use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Owns the decompressed container for the length of one extraction.
///
/// With cleanup enabled the file is deleted exactly once: by [`remove`] on
/// the normal path, or on drop if the extraction unwound before that.
///
/// [`remove`]: IntermediateArtifact::remove
pub(crate) struct IntermediateArtifact {
    path: PathBuf,
    armed: bool,
}

impl IntermediateArtifact {
    pub(crate) fn new(path: PathBuf, cleanup: bool) -> Self {
        Self {
            path,
            armed: cleanup,
        }
    }

    pub(crate) fn path(&self) -> &Path { &self.path }

    /// Delete the file now. A file that was never created counts as removed.
    pub(crate) fn remove(mut self) -> Result<()> {
        if !self.armed {
            return Ok(());
        }
        self.armed = false;
        tracing::debug!(path = %self.path.display(), "removing intermediate container");
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::CleanupFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl Drop for IntermediateArtifact {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove intermediate container");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_deletes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pkg.tar");
        std::fs::write(&path, b"tar").unwrap();

        IntermediateArtifact::new(path.clone(), true).remove().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn drop_deletes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pkg.tar");
        std::fs::write(&path, b"tar").unwrap();

        drop(IntermediateArtifact::new(path.clone(), true));
        assert!(!path.exists());
    }

    #[test]
    fn disabled_cleanup_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pkg.tar");
        std::fs::write(&path, b"tar").unwrap();

        IntermediateArtifact::new(path.clone(), false).remove().unwrap();
        drop(IntermediateArtifact::new(path.clone(), false));
        assert!(path.exists());
    }

    #[test]
    fn missing_file_counts_as_removed() {
        let dir = tempdir().unwrap();
        let artifact = IntermediateArtifact::new(dir.path().join("never-written.tar"), true);
        artifact.remove().unwrap();
    }
}
