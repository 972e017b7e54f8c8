//! Extraction pipeline.
//!
//! `extract` walks `Decompressing -> Materializing -> Cleanup`. A failure in
//! any stage goes straight to cleanup: the container reader is closed first,
//! then the intermediate container is deleted, and the original error is
//! returned.
//!
//! Concurrent extractions into the same target directory are not
//! coordinated; callers serialize them.

use std::path::Path;

use crate::container::ContainerReader;
use crate::decompress::{create_output, intermediate_path, open_decoder, write_decoded};
use crate::detect::has_compressed_suffix;
use crate::entry::ArchiveReport;
use crate::error::{Error, Result};
use crate::format::{Codec, Compression};
use crate::options::{ExtractOptions, Progress};

mod artifact;
mod materialize;

use artifact::IntermediateArtifact;
use materialize::{Materialized, materialize};

/// Unpack `archive` into the existing directory `target`.
pub fn extract(
    archive: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let archive = archive.as_ref();
    let target = target.as_ref();

    if !target.is_dir() {
        return Err(Error::TargetMissing {
            path: target.to_path_buf(),
        });
    }

    let codec = source_compression(archive, options.compression);
    let mut artifact = None;

    let result = run(archive, target, codec, &mut artifact, options);
    let report = finish(artifact, result)?;

    options.report(Progress::Completed {
        entries: report.entry_count,
        total_bytes: report.total_bytes,
    });
    tracing::info!(
        archive = %archive.display(),
        target = %target.display(),
        entries = report.entry_count,
        bytes = report.total_bytes,
        skipped = report.skipped.len(),
        "extraction complete"
    );
    Ok(report)
}

/// [`extract`] with default options: framing by file name, cleanup on.
pub fn extract_with_defaults(
    archive: impl AsRef<Path>,
    target: impl AsRef<Path>,
) -> Result<ArchiveReport> {
    extract(archive, target, &ExtractOptions::default())
}

/// `None` for a raw container, `Some(codec)` when decompression is needed;
/// an inner `None` codec means sniff it from the data.
fn source_compression(archive: &Path, compression: Compression) -> Option<Option<Codec>> {
    match compression {
        Compression::Auto if has_compressed_suffix(archive) => Some(None),
        Compression::Auto | Compression::None => None,
        explicit => Some(explicit.codec()),
    }
}

fn run(
    archive: &Path,
    target: &Path,
    codec: Option<Option<Codec>>,
    artifact: &mut Option<IntermediateArtifact>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let container = match codec {
        Some(codec) => {
            tracing::debug!(archive = %archive.display(), "stage: decompressing");
            let path = intermediate_path(archive);
            let mut decoder = open_decoder(archive, codec)?;
            let output = create_output(&path)?;
            // guard the file only once this call has created it
            let created = artifact.insert(IntermediateArtifact::new(path, options.cleanup));
            let bytes = write_decoded(&mut decoder, archive, output, created.path())?;
            tracing::debug!(container = %created.path().display(), bytes, "decompressed");
            created.path().to_path_buf()
        }
        None => archive.to_path_buf(),
    };

    tracing::debug!(container = %container.display(), "stage: materializing");
    let mut reader = ContainerReader::open(&container)?;
    let mut report = ArchiveReport {
        intermediate: artifact.as_ref().map(|a| a.path().to_path_buf()),
        ..Default::default()
    };

    {
        let mut entries = reader.entries()?;
        while let Some(entry) = entries.next_entry() {
            let mut entry = entry?;
            match materialize(&mut entry, target, options)? {
                Materialized::Written(extracted) => {
                    report.total_bytes += extracted.size;
                    report.entries.push(extracted);
                }
                Materialized::Skipped => report.skipped.push(entry.name.clone()),
                Materialized::Root => {}
            }
        }
    }

    report.entry_count = report.entries.len();
    reader.close();
    Ok(report)
}

/// Cleanup stage. The reader is already closed when this runs.
fn finish(
    artifact: Option<IntermediateArtifact>,
    result: Result<ArchiveReport>,
) -> Result<ArchiveReport> {
    let Some(artifact) = artifact else {
        return result;
    };

    tracing::debug!("stage: cleanup");
    match (result, artifact.remove()) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup)) => {
            tracing::warn!(error = %cleanup, "cleanup failed after extraction error");
            Err(e)
        }
    }
}
