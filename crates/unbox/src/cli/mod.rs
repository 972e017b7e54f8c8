use clap::{Parser, Subcommand};

pub mod extract;
pub mod remove;
pub mod verify;

#[derive(Debug, Parser)]
#[command(name = "unbox", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Unpack an archive into an existing directory
    #[command(alias = "x", name = "extract")]
    Extract(extract::ExtractArg),
    /// Compare a file's SHA-256 with an expected hex digest (prints 1 or 0)
    #[command(alias = "vh", name = "verify-hash")]
    VerifyHash(verify::VerifyHashArg),
    /// Check the big-endian CRC32 trailer of a blob (prints 1 or 0)
    #[command(alias = "vc", name = "verify-crc")]
    VerifyCrc(verify::VerifyCrcArg),
    /// Recursively delete a directory tree without following symlinks
    #[command(alias = "rm", name = "remove")]
    Remove(remove::RemoveArg),
}
