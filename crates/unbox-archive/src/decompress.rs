//! DEFLATE decompression of a source archive into its raw container.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::detect::detect_from_reader;
use crate::error::{Error, Result};
use crate::format::{Codec, Decoder};

const BUFFER_SIZE: usize = 8 * 1024;
const FALLBACK_SUFFIX: &str = ".unpacked";

/// Name of the decompressed container written beside `source`.
///
/// `x.tar.gz` and `x.tgz` become `x.tar`, `x.gz` becomes `x`. Any other name
/// gets `.unpacked` appended so the output can never replace the input.
pub fn intermediate_path(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let derived = if let Some(stem) = name.strip_suffix(".tgz").filter(|s| !s.is_empty()) {
        format!("{stem}.tar")
    } else if let Some(stem) = name.strip_suffix(".gz").filter(|s| !s.is_empty()) {
        stem.to_string()
    } else {
        let mut fallback = OsString::from(source.file_name().unwrap_or_default());
        fallback.push(FALLBACK_SUFFIX);
        return source.with_file_name(fallback);
    };

    source.with_file_name(derived)
}

/// Decompress an in-memory DEFLATE stream.
pub fn decompress_bytes(data: &[u8], codec: Codec) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    codec
        .decoder(data)
        .read_to_end(&mut out)
        .map_err(|source| Error::Decompression {
            path: PathBuf::from("<memory>"),
            source,
        })?;
    Ok(out)
}

/// Decompress `source` into [`intermediate_path`] and return that path.
///
/// With `codec` unset the framing is sniffed from the leading bytes. A
/// partially written output is removed when decoding fails; a file that was
/// already at the output path is left alone if the source cannot be opened.
pub fn decompress_file(source: &Path, codec: Option<Codec>) -> Result<PathBuf> {
    let dest = intermediate_path(source);
    let mut decoder = open_decoder(source, codec)?;
    let output = create_output(&dest)?;
    write_decoded(&mut decoder, source, output, &dest)?;
    Ok(dest)
}

/// Open `source` and wrap it in the decoder for its framing. Nothing is
/// written yet.
pub(crate) fn open_decoder(
    source: &Path,
    codec: Option<Codec>,
) -> Result<Decoder<BufReader<File>>> {
    let mut input = File::open(source).map_err(|e| Error::ExtractionFailed {
        path: source.to_path_buf(),
        source: e,
    })?;

    let codec = match codec {
        Some(codec) => codec,
        None => {
            let codec = detect_from_reader(&mut input)?;
            input.rewind()?;
            codec
        }
    };
    tracing::debug!(source = %source.display(), ?codec, "opened compressed source");

    Ok(codec.decoder(BufReader::new(input)))
}

/// Create (or truncate) the decompressed container at `dest`.
pub(crate) fn create_output(dest: &Path) -> Result<File> {
    if dest.exists() {
        tracing::warn!(path = %dest.display(), "overwriting existing intermediate file");
    }
    File::create(dest).map_err(|e| Error::ExtractionFailed {
        path: dest.to_path_buf(),
        source: e,
    })
}

/// Stream `decoder` into `output`, returning the number of bytes written.
///
/// On failure the handle is closed and `dest` is deleted, so a broken source
/// never leaves a partial container behind.
pub(crate) fn write_decoded<R: Read>(
    decoder: &mut R,
    source: &Path,
    mut output: File,
    dest: &Path,
) -> Result<u64> {
    let result = copy_decoded(decoder, source, &mut output, dest);
    drop(output);

    if result.is_err() {
        match std::fs::remove_file(dest) {
            Ok(()) => tracing::debug!(path = %dest.display(), "removed partial output"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %dest.display(), error = %e, "failed to remove partial output");
            }
        }
    }
    result
}

fn copy_decoded<R: Read>(
    decoder: &mut R,
    source: &Path,
    output: &mut File,
    dest: &Path,
) -> Result<u64> {
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        let n = match decoder.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::Decompression {
                    path: source.to_path_buf(),
                    source: e,
                });
            }
        };
        output
            .write_all(&buffer[..n])
            .map_err(|e| Error::ExtractionFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
        written += n as u64;
    }

    output.flush().map_err(|e| Error::ExtractionFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression as Level;
    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use tempfile::tempdir;

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Level::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn intermediate_names() {
        assert_eq!(intermediate_path(Path::new("pkg.tar.gz")), Path::new("pkg.tar"));
        assert_eq!(intermediate_path(Path::new("dl/pkg.tgz")), Path::new("dl/pkg.tar"));
        assert_eq!(intermediate_path(Path::new("blob.gz")), Path::new("blob"));
        assert_eq!(intermediate_path(Path::new("pkg.tar")), Path::new("pkg.tar.unpacked"));
        assert_eq!(intermediate_path(Path::new("firmware")), Path::new("firmware.unpacked"));
        // a bare suffix has no stem to keep
        assert_eq!(intermediate_path(Path::new(".gz")), Path::new(".gz.unpacked"));
    }

    #[test]
    fn intermediate_never_equals_source() {
        for name in ["a.tar.gz", "a.tgz", "a.gz", "a.tar", "a", ".gz", "a.gz.gz"] {
            assert_ne!(intermediate_path(Path::new(name)), Path::new(name), "{name}");
        }
    }

    #[test]
    fn decompress_bytes_all_framings() {
        let data = b"the quick brown fox".repeat(20);

        let mut zlib = ZlibEncoder::new(Vec::new(), Level::default());
        zlib.write_all(&data).unwrap();
        let mut raw = DeflateEncoder::new(Vec::new(), Level::default());
        raw.write_all(&data).unwrap();

        assert_eq!(decompress_bytes(&gzip(&data), Codec::Gzip).unwrap(), data);
        assert_eq!(decompress_bytes(&zlib.finish().unwrap(), Codec::Zlib).unwrap(), data);
        assert_eq!(decompress_bytes(&raw.finish().unwrap(), Codec::Deflate).unwrap(), data);
    }

    #[test]
    fn decompress_bytes_rejects_garbage() {
        let result = decompress_bytes(&[0x1F, 0x8B, 0xFF, 0xFF, 0xFF, 0xFF], Codec::Gzip);
        assert!(matches!(result, Err(Error::Decompression { .. })));
    }

    #[test]
    fn decompress_file_sniffs_gzip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("blob.gz");
        std::fs::write(&source, gzip(b"payload")).unwrap();

        let out = decompress_file(&source, None).unwrap();

        assert_eq!(out, dir.path().join("blob"));
        assert_eq!(std::fs::read(&out).unwrap(), b"payload");
        assert!(source.exists());
    }

    #[test]
    fn decompress_file_missing_source_leaves_output_path_alone() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("pkg.tar");
        std::fs::write(&existing, b"keep me").unwrap();

        let result = decompress_file(&dir.path().join("pkg.tar.gz"), None);

        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
        assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
    }

    #[test]
    fn decompress_file_removes_partial_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.tar.gz");
        let noise: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
        let mut data = gzip(&noise);
        data.truncate(data.len() / 2);
        std::fs::write(&source, data).unwrap();

        let result = decompress_file(&source, Some(Codec::Gzip));

        assert!(matches!(result, Err(Error::Decompression { .. })));
        assert!(!dir.path().join("broken.tar").exists());
    }
}
