use sha2::Digest;

/// Incremental digest accumulator.
///
/// Each validator owns its own accumulator for the duration of one call.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

pub struct Sha256Hasher(sha2::Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Default for Sha256Hasher {
    fn default() -> Self { Self::new() }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self(sha2::Sha256::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { sha2::Sha256::digest(data).to_vec() }
}

/// CRC-32 (IEEE) accumulator. `finalize` yields the big-endian bytes.
#[derive(Default)]
pub struct Crc32Hasher(crc32fast::Hasher);

impl Hasher for Crc32Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_be_bytes().to_vec() }
}

impl Crc32Hasher {
    pub fn new() -> Self { Self(crc32fast::Hasher::new()) }

    pub fn checksum(data: &[u8]) -> u32 { crc32fast::hash(data) }
}
