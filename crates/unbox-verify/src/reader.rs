use std::io::{self, Read};

use crate::{Hasher, Result, VerificationError};

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source so content is hashed while it is being copied.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
    bytes:  u64,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self {
            reader,
            hasher,
            bytes: 0,
        }
    }

    /// Number of bytes hashed so far.
    pub fn bytes_read(&self) -> u64 { self.bytes }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes += n as u64;
        }
        Ok(n)
    }
}

impl<R: Read, H: Hasher> VerifiedReader<R, H> {
    /// Finalize the accumulator and return the raw digest.
    pub fn digest(self) -> Vec<u8> { self.hasher.finalize() }

    /// Finalize verification against expected hash.
    /// Returns error on mismatch.
    pub fn finish(self, expected: &[u8]) -> Result<()> {
        let actual = self.hasher.finalize();
        if actual == expected {
            Ok(())
        } else {
            Err(VerificationError::Mismatch {
                expected: expected.to_vec(),
                actual,
            })
        }
    }
}
