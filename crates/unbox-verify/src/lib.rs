//! Integrity validators for unpacked packages.
//!
//! Two checks are provided, both returning `bool` on comparison so that a
//! mismatch stays an ordinary outcome for the caller to act on:
//!
//! - **CRC32 trailer**: a blob whose last four bytes are the big-endian CRC-32
//!   of the rest ([`validate_crc`]).
//! - **Chunked SHA-256**: a file hashed in fixed-size reads and compared with
//!   an expected hex digest ([`validate_hash`]). The file is never loaded into
//!   memory in one piece.
//!
//! # Example
//!
//! ```
//! use unbox_verify::{append_crc, validate_crc};
//!
//! let mut blob = b"firmware".to_vec();
//! append_crc(&mut blob);
//! assert!(validate_crc(&blob));
//! ```

pub use self::crc::{append_crc, validate_crc};
pub use self::digest::{DEFAULT_CHUNK_SIZE, file_digest, validate_hash};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Crc32Hasher, Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod crc;
mod digest;
mod error;
mod hasher;
mod reader;
