use std::fmt;
use std::path::PathBuf;

/// Kind of a container entry, as far as extraction is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    RegularFile,
    Directory,
    Unsupported(UnsupportedKind),
}

/// Entry kinds that are recognised but never materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedKind {
    Symlink,
    HardLink,
    CharDevice,
    BlockDevice,
    Fifo,
    Other(u8),
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => f.write_str("symlink"),
            Self::HardLink => f.write_str("hard link"),
            Self::CharDevice => f.write_str("character device"),
            Self::BlockDevice => f.write_str("block device"),
            Self::Fifo => f.write_str("fifo"),
            Self::Other(tag) => write!(f, "type tag {:?}", *tag as char),
        }
    }
}

impl EntryKind {
    pub fn is_file(&self) -> bool { matches!(self, Self::RegularFile) }

    pub fn is_directory(&self) -> bool { matches!(self, Self::Directory) }
}

/// One entry that made it onto disk.
#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_name: String,
    pub target_path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub hash: Option<String>,
}

/// Summary of one `extract` call.
#[derive(Clone, Debug, Default)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
    /// Names of entries left out under the skip policy.
    pub skipped: Vec<String>,
    /// The decompressed container, when one was produced.
    pub intermediate: Option<PathBuf>,
}

impl ArchiveReport {
    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| e.kind.is_file())
    }

    pub fn directories(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| e.kind.is_directory())
    }
}
