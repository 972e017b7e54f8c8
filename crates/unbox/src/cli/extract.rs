use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use unbox_archive::{Compression, ExtractOptions, HashStrategy, Progress, UnsupportedPolicy};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CompressionArg {
    Auto,
    None,
    Gzip,
    Zlib,
    Deflate,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Auto => Compression::Auto,
            CompressionArg::None => Compression::None,
            CompressionArg::Gzip => Compression::Gzip,
            CompressionArg::Zlib => Compression::Zlib,
            CompressionArg::Deflate => Compression::Deflate,
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct ExtractArg {
    /// Archive to unpack (`.tar`, `.tar.gz`, `.tgz`)
    pub archive: PathBuf,

    /// Existing directory to unpack into
    #[arg(short, long, default_value = "lib")]
    pub target: PathBuf,

    /// Keep the decompressed intermediate container
    #[arg(long)]
    pub no_cleanup: bool,

    /// Compression of the archive
    #[arg(long, value_enum, default_value_t = CompressionArg::Auto)]
    pub compression: CompressionArg,

    /// Abort on symlinks, devices and other unsupported entries instead of skipping them
    #[arg(long)]
    pub fail_unsupported: bool,

    /// Print the SHA-256 of every extracted file
    #[arg(long)]
    pub sha256: bool,
}

impl ExtractArg {
    pub fn run(self) -> Result<()> {
        let options = ExtractOptions::default()
            .cleanup(!self.no_cleanup)
            .compression(self.compression.into())
            .unsupported(if self.fail_unsupported {
                UnsupportedPolicy::Fail
            } else {
                UnsupportedPolicy::Skip
            })
            .hash_strategy(if self.sha256 {
                HashStrategy::Sha256
            } else {
                HashStrategy::None
            })
            .on_progress(Arc::new(|progress: Progress| match progress {
                Progress::Completed { .. } => {}
                other => println!("{other}"),
            }));

        let report = unbox_archive::extract(&self.archive, &self.target, &options)
            .with_context(|| format!("failed to extract {}", self.archive.display()))?;

        if self.sha256 {
            for file in report.files() {
                if let Some(hash) = &file.hash {
                    println!("{hash}  {}", file.target_path.display());
                }
            }
        }

        println!(
            "Extracted {} entries ({} bytes) into {}",
            report.entry_count,
            report.total_bytes,
            self.target.display()
        );
        Ok(())
    }
}
