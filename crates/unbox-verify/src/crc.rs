//! CRC32 trailer validation.
//!
//! A protected blob is the payload followed by the CRC-32 of the payload,
//! encoded big-endian in the last four bytes.

use crate::hasher::Crc32Hasher;

const TRAILER_LEN: usize = 4;

/// Check that the last four bytes of `data` are the big-endian CRC-32 of the
/// bytes before them.
///
/// A mismatch is an ordinary outcome and yields `false`. Buffers too short to
/// hold a trailer are never valid.
pub fn validate_crc(data: &[u8]) -> bool {
    let Some(split) = data.len().checked_sub(TRAILER_LEN) else {
        return false;
    };
    let (payload, trailer) = data.split_at(split);
    let stored = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let computed = Crc32Hasher::checksum(payload);
    if stored != computed {
        tracing::debug!(stored, computed, "crc32 trailer mismatch");
    }
    stored == computed
}

/// Append the big-endian CRC-32 of `data` to it.
pub fn append_crc(data: &mut Vec<u8>) {
    let crc = Crc32Hasher::checksum(data);
    data.extend_from_slice(&crc.to_be_bytes());
}
