use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::{Hasher, Result, Sha256Hasher, VerificationError};

/// Read size used by the file validators unless the caller picks another.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Compute the lowercase hex SHA-256 of a file, reading at most `chunk_size`
/// bytes at a time.
pub fn file_digest(path: impl AsRef<Path>, chunk_size: usize) -> Result<String> {
    let path = path.as_ref();
    if chunk_size == 0 {
        return Err(VerificationError::IllegalState("chunk size must be non-zero"));
    }

    let read_err = |source: io::Error| VerificationError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_err)?;
    let mut hasher = Sha256Hasher::new();
    let mut buffer = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_err(e)),
        };
        hasher.update(&buffer[..n]);
        total += n as u64;
    }

    let digest = hex::encode(hasher.finalize());
    tracing::debug!(path = %path.display(), bytes = total, %digest, "hashed file");
    Ok(digest)
}

/// Compare the SHA-256 of a file against an expected hex digest.
///
/// The comparison is exact against the lowercase encoding. A mismatch returns
/// `Ok(false)`; only failing to read the file is an error.
pub fn validate_hash(
    path: impl AsRef<Path>,
    expected_hex: &str,
    chunk_size: usize,
) -> Result<bool> {
    let actual = file_digest(path, chunk_size)?;
    Ok(actual == expected_hex)
}
