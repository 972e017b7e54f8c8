use crate::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Counts of what a recursive removal deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub files:       usize,
    pub directories: usize,
}

/// Remove `root` and everything beneath it, children before parents.
///
/// Entries are classified with `symlink_metadata`, so a symlink is unlinked
/// as a file and never traversed, even when it points at a directory outside
/// the subtree. `root` itself must be a real directory.
pub fn remove_dir_recursive(root: impl AsRef<Path>) -> Result<RemovalReport> {
    let root = root.as_ref();

    let metadata = fs::symlink_metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: root.to_path_buf(),
        },
        _ => Error::Read {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut report = RemovalReport::default();
    remove_tree(root, &mut report)?;
    Ok(report)
}

fn remove_tree(dir: &Path, report: &mut RemovalReport) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::Read {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_type = fs::symlink_metadata(&path)
            .map_err(|e| Error::Read {
                path: path.clone(),
                source: e,
            })?
            .file_type();

        if file_type.is_dir() {
            remove_tree(&path, report)?;
        } else {
            tracing::debug!(path = %path.display(), "removing file");
            remove_link(&path, file_type.is_symlink())?;
            report.files += 1;
        }
    }

    tracing::debug!(path = %dir.display(), "removing directory");
    fs::remove_dir(dir).map_err(|e| Error::Remove {
        path: dir.to_path_buf(),
        source: e,
    })?;
    report.directories += 1;
    Ok(())
}

// Directory symlinks on Windows are removed with `remove_dir`.
#[cfg(windows)]
fn remove_link(path: &Path, is_symlink: bool) -> Result<()> {
    let result = match fs::remove_file(path) {
        Err(_) if is_symlink => fs::remove_dir(path),
        other => other,
    };
    result.map_err(|e| Error::Remove {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(not(windows))]
fn remove_link(path: &Path, _is_symlink: bool) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::Remove {
        path: path.to_path_buf(),
        source: e,
    })
}
