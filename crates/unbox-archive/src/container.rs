//! Forward-only reader over a tar container.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tar::EntryType;

use crate::entry::{EntryKind, UnsupportedKind};
use crate::error::{Error, Result};

/// Owns the open container file. Dropping it (or calling [`close`]) releases
/// the handle.
///
/// [`close`]: ContainerReader::close
pub struct ContainerReader {
    path: PathBuf,
    archive: tar::Archive<BufReader<File>>,
    started: bool,
}

impl ContainerReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::ExtractionFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive: tar::Archive::new(BufReader::new(file)),
            started: false,
        })
    }

    /// Start the single pass over the container. Only one pass is possible.
    pub fn entries(&mut self) -> Result<Entries<'_>> {
        if self.started {
            return Err(Error::Container {
                path: self.path.clone(),
                source: io::Error::other("container entries were already iterated"),
            });
        }
        self.started = true;

        let inner = self.archive.entries().map_err(|e| Error::Container {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Entries {
            path: &self.path,
            inner,
        })
    }

    pub fn close(self) {
        tracing::debug!(path = %self.path.display(), "closing container");
    }
}

/// Lazy sequence of container entries in stored order.
///
/// Each [`PendingEntry`] borrows the sequence, so it has to be dropped
/// before the next one can be requested.
pub struct Entries<'a> {
    path: &'a Path,
    inner: tar::Entries<'a, BufReader<File>>,
}

/// An entry read from the container but not yet materialized.
pub struct PendingEntry<'r> {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    content: Box<dyn Read + 'r>,
}

impl<'r> PendingEntry<'r> {
    #[cfg(test)]
    pub(crate) fn in_memory(name: &str, kind: EntryKind, data: &'r [u8]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            size: data.len() as u64,
            content: Box::new(data),
        }
    }
}

impl Read for PendingEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.content.read(buf) }
}

impl Entries<'_> {
    pub fn next_entry(&mut self) -> Option<Result<PendingEntry<'_>>> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(Error::Container {
                        path: self.path.to_path_buf(),
                        source: e,
                    }));
                }
            };

            let entry_type = entry.header().entry_type();
            if matches!(entry_type, EntryType::XGlobalHeader) {
                continue;
            }

            let name = match String::from_utf8(entry.path_bytes().into_owned()) {
                Ok(name) => name,
                Err(e) => {
                    let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    return Some(Err(Error::InvalidEntryName(lossy)));
                }
            };
            let kind = classify(entry_type, &name);
            let size = entry.size();

            return Some(Ok(PendingEntry {
                name,
                kind,
                size,
                content: Box::new(entry),
            }));
        }
    }
}

fn classify(entry_type: EntryType, name: &str) -> EntryKind {
    match entry_type {
        // pre-POSIX archives mark directories only by the trailing slash
        EntryType::Regular | EntryType::Continuous if name.ends_with('/') => EntryKind::Directory,
        EntryType::Regular | EntryType::Continuous | EntryType::GNUSparse => {
            EntryKind::RegularFile
        }
        EntryType::Directory => EntryKind::Directory,
        EntryType::Symlink => EntryKind::Unsupported(UnsupportedKind::Symlink),
        EntryType::Link => EntryKind::Unsupported(UnsupportedKind::HardLink),
        EntryType::Char => EntryKind::Unsupported(UnsupportedKind::CharDevice),
        EntryType::Block => EntryKind::Unsupported(UnsupportedKind::BlockDevice),
        EntryType::Fifo => EntryKind::Unsupported(UnsupportedKind::Fifo),
        other => EntryKind::Unsupported(UnsupportedKind::Other(other.as_byte())),
    }
}
