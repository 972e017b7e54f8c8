use std::fs::File;
use std::io;
use std::path::Path;

use unbox_verify::{Sha256Hasher, VerifiedReader};

use crate::container::PendingEntry;
use crate::entry::{EntryKind, ExtractedEntry};
use crate::error::{Error, Result};
use crate::options::{ExtractOptions, HashStrategy, Progress, UnsupportedPolicy};
use crate::sanitize::normalize_entry_path;

pub(crate) enum Materialized {
    Written(ExtractedEntry),
    Skipped,
    /// The entry named the extraction root itself.
    Root,
}

/// Put one entry on disk under `root`.
///
/// Parent directories are never created here; they must have come earlier
/// in the container.
pub(crate) fn materialize(
    entry: &mut PendingEntry<'_>,
    root: &Path,
    options: &ExtractOptions,
) -> Result<Materialized> {
    let Some(target_path) = normalize_entry_path(&entry.name, entry.kind, root)? else {
        tracing::debug!(name = %entry.name, "skipping archive root entry");
        return Ok(Materialized::Root);
    };

    match entry.kind {
        EntryKind::Directory => {
            create_directory(&target_path)?;
            options.report(Progress::DirectoryCreated {
                path: target_path.clone(),
            });
            Ok(Materialized::Written(ExtractedEntry {
                original_name: entry.name.clone(),
                target_path,
                kind: entry.kind,
                size: 0,
                hash: None,
            }))
        }
        EntryKind::RegularFile => {
            let (size, hash) = write_file(entry, &target_path, options.hash_strategy)?;
            options.report(Progress::FileExtracted {
                path: target_path.clone(),
                bytes: size,
            });
            Ok(Materialized::Written(ExtractedEntry {
                original_name: entry.name.clone(),
                target_path,
                kind: entry.kind,
                size,
                hash,
            }))
        }
        EntryKind::Unsupported(kind) => match options.unsupported {
            UnsupportedPolicy::Skip => {
                tracing::warn!(name = %entry.name, %kind, "skipping unsupported entry");
                options.report(Progress::EntrySkipped {
                    name: entry.name.clone(),
                    kind,
                });
                Ok(Materialized::Skipped)
            }
            UnsupportedPolicy::Fail => Err(Error::UnsupportedEntry {
                entry: entry.name.clone(),
                kind: kind.to_string(),
            }),
        },
    }
}

fn create_directory(path: &Path) -> Result<()> {
    std::fs::create_dir(path).map_err(|e| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file(
    entry: &mut PendingEntry<'_>,
    path: &Path,
    strategy: HashStrategy,
) -> Result<(u64, Option<String>)> {
    let failed = |source: io::Error| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(failed)?;

    let (written, hash) = match strategy {
        HashStrategy::None => (io::copy(entry, &mut file).map_err(failed)?, None),
        HashStrategy::Sha256 => {
            let mut reader = VerifiedReader::new(&mut *entry, Sha256Hasher::new());
            let written = io::copy(&mut reader, &mut file).map_err(failed)?;
            (written, Some(hex::encode(reader.digest())))
        }
    };

    if written != entry.size {
        return Err(Error::TruncatedEntry {
            entry: entry.name.clone(),
            expected: entry.size,
            actual: written,
        });
    }

    Ok((written, hash))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tempfile::tempdir;

    use super::*;
    use crate::entry::UnsupportedKind;

    fn written(result: Materialized) -> ExtractedEntry {
        match result {
            Materialized::Written(entry) => entry,
            _ => panic!("entry was not written"),
        }
    }

    #[test]
    fn creates_directory_then_file() {
        let dir = tempdir().unwrap();
        let options = ExtractOptions::default();

        let mut data_dir = PendingEntry::in_memory("./data/", EntryKind::Directory, b"");
        let created = written(materialize(&mut data_dir, dir.path(), &options).unwrap());
        assert!(dir.path().join("data").is_dir());
        assert_eq!(created.target_path, dir.path().join("data"));

        let mut readme = PendingEntry::in_memory("./data/readme.txt", EntryKind::RegularFile, b"hello");
        let file = written(materialize(&mut readme, dir.path(), &options).unwrap());
        assert_eq!(file.size, 5);
        assert!(file.hash.is_none());
        assert_eq!(std::fs::read_to_string(dir.path().join("data/readme.txt")).unwrap(), "hello");
    }

    #[test]
    fn existing_directory_fails() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();

        let mut entry = PendingEntry::in_memory("data/", EntryKind::Directory, b"");
        let result = materialize(&mut entry, dir.path(), &ExtractOptions::default());
        assert!(matches!(result, Err(Error::DirectoryCreationFailed { .. })));
    }

    #[test]
    fn missing_parent_is_not_created() {
        let dir = tempdir().unwrap();

        let mut entry = PendingEntry::in_memory("missing/file.txt", EntryKind::RegularFile, b"x");
        let result = materialize(&mut entry, dir.path(), &ExtractOptions::default());

        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
        assert!(!dir.path().join("missing").exists());

        let mut nested = PendingEntry::in_memory("a/b/", EntryKind::Directory, b"");
        let result = materialize(&mut nested, dir.path(), &ExtractOptions::default());
        assert!(matches!(result, Err(Error::DirectoryCreationFailed { .. })));
    }

    #[test]
    fn existing_file_is_truncated() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.txt"), "a much longer previous body").unwrap();

        let mut entry = PendingEntry::in_memory("config.txt", EntryKind::RegularFile, b"new");
        materialize(&mut entry, dir.path(), &ExtractOptions::default()).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("config.txt")).unwrap(), "new");
    }

    #[test]
    fn short_content_is_truncated_entry() {
        let dir = tempdir().unwrap();
        let mut entry = PendingEntry::in_memory("short.bin", EntryKind::RegularFile, b"abc");
        entry.size = 10;

        let result = materialize(&mut entry, dir.path(), &ExtractOptions::default());
        assert!(matches!(
            result,
            Err(Error::TruncatedEntry { expected: 10, actual: 3, .. })
        ));
    }

    #[test]
    fn sha256_is_computed_while_writing() {
        let dir = tempdir().unwrap();
        let options = ExtractOptions::default().hash_strategy(HashStrategy::Sha256);

        let mut entry = PendingEntry::in_memory("hello.txt", EntryKind::RegularFile, b"hello world");
        let file = written(materialize(&mut entry, dir.path(), &options).unwrap());
        assert_eq!(
            file.hash.as_deref(),
            Some("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
        );
    }

    #[test]
    fn unsupported_entry_skip_policy() {
        let dir = tempdir().unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let options = ExtractOptions::default().on_progress(Arc::new(move |p: Progress| {
            sink.lock().unwrap().push(p);
        }));

        let kind = EntryKind::Unsupported(UnsupportedKind::Symlink);
        let mut entry = PendingEntry::in_memory("bin/tool", kind, b"");
        let result = materialize(&mut entry, dir.path(), &options).unwrap();

        assert!(matches!(result, Materialized::Skipped));
        assert!(!dir.path().join("bin").exists());
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[Progress::EntrySkipped {
                name: "bin/tool".to_string(),
                kind: UnsupportedKind::Symlink,
            }]
        );
    }

    #[test]
    fn unsupported_entry_fail_policy() {
        let dir = tempdir().unwrap();
        let options = ExtractOptions::default().unsupported(UnsupportedPolicy::Fail);

        let kind = EntryKind::Unsupported(UnsupportedKind::CharDevice);
        let mut entry = PendingEntry::in_memory("dev/tty", kind, b"");
        let result = materialize(&mut entry, dir.path(), &options);
        assert!(matches!(result, Err(Error::UnsupportedEntry { .. })));
    }

    #[test]
    fn traversal_is_rejected_before_any_write() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("lib");
        std::fs::create_dir(&root).unwrap();

        let mut entry = PendingEntry::in_memory("../escape.txt", EntryKind::RegularFile, b"x");
        let result = materialize(&mut entry, &root, &ExtractOptions::default());

        assert!(matches!(result, Err(Error::PathTraversal { .. })));
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[test]
    fn root_entry_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut entry = PendingEntry::in_memory("./", EntryKind::Directory, b"");
        let result = materialize(&mut entry, dir.path(), &ExtractOptions::default()).unwrap();
        assert!(matches!(result, Materialized::Root));
    }
}
