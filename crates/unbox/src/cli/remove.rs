use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Clone, Debug, clap::Args)]
pub struct RemoveArg {
    /// Directory to delete
    pub dir: PathBuf,
}

impl RemoveArg {
    pub fn run(self) -> Result<()> {
        let report = unbox_fs::remove_dir_recursive(&self.dir)
            .with_context(|| format!("failed to remove {}", self.dir.display()))?;
        println!(
            "Removed {} files and {} directories from {}",
            report.files,
            report.directories,
            self.dir.display()
        );
        Ok(())
    }
}
