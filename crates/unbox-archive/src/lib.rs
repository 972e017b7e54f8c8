//! Package unpacking with path sanitization and guaranteed cleanup.
//!
//! # Architecture
//!
//! - `format.rs` / `detect.rs` - DEFLATE framings and their detection
//! - `decompress.rs` - Compressed archive to intermediate container
//! - `container.rs` - Forward-only tar entry reader
//! - `sanitize.rs` - Entry name to destination path (traversal prevention)
//! - `extract/` - Materializer and the extraction pipeline
//!
//! # Example
//!
//! ```no_run
//! use unbox_archive::{ExtractOptions, extract};
//!
//! let report = extract("pkg.tar.gz", "lib", &ExtractOptions::default())?;
//! println!("{} entries", report.entry_count);
//! # Ok::<(), unbox_archive::Error>(())
//! ```

pub use container::{ContainerReader, Entries, PendingEntry};
pub use decompress::{decompress_bytes, decompress_file, intermediate_path};
pub use entry::{ArchiveReport, EntryKind, ExtractedEntry, UnsupportedKind};
pub use error::{Error, ErrorKind, Result};
pub use extract::{extract, extract_with_defaults};
pub use format::{Codec, Compression};
pub use options::{ExtractOptions, HashStrategy, Progress, ProgressCallback, UnsupportedPolicy};
pub use sanitize::normalize_entry_path;

mod container;
mod decompress;
mod detect;
mod entry;
mod error;
mod extract;
mod format;
mod options;
mod sanitize;
