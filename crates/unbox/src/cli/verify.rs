use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use unbox_verify::DEFAULT_CHUNK_SIZE;

#[derive(Clone, Debug, clap::Args)]
pub struct VerifyHashArg {
    /// File to hash
    pub file: PathBuf,

    /// Expected lowercase hex SHA-256 digest
    pub expected: String,

    /// Bytes read per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl VerifyHashArg {
    pub fn run(self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("--chunk-size must be greater than zero");
        }
        let matches = unbox_verify::validate_hash(&self.file, &self.expected, self.chunk_size)
            .with_context(|| format!("failed to hash {}", self.file.display()))?;
        tracing::info!(file = %self.file.display(), matches, "sha256 check");
        println!("{}", u8::from(matches));
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct VerifyCrcArg {
    /// Blob whose last four bytes are the big-endian CRC32 of the rest
    pub file: PathBuf,
}

impl VerifyCrcArg {
    pub fn run(self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let matches = unbox_verify::validate_crc(&data);
        tracing::info!(file = %self.file.display(), matches, "crc32 check");
        println!("{}", u8::from(matches));
        Ok(())
    }
}
