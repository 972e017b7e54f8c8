use std::io::{self, Read};
use std::path::Path;

use crate::format::Codec;

const COMPRESSED_SUFFIXES: [&str; 2] = [".gz", ".tgz"];

/// Whether the file name says the archive is compressed.
pub fn has_compressed_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| COMPRESSED_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Pick the DEFLATE framing from the first bytes of a compressed stream.
pub fn detect_codec(data: &[u8]) -> Codec {
    match data {
        [0x1F, 0x8B, ..] => Codec::Gzip,
        [cmf, flg, ..] if is_zlib_header(*cmf, *flg) => Codec::Zlib,
        _ => Codec::Deflate,
    }
}

fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    let method = cmf & 0x0F;
    let window = cmf >> 4;
    method == 8 && window <= 7 && ((u16::from(cmf) << 8) | u16::from(flg)) % 31 == 0
}

/// Read up to two bytes of `reader` and detect its framing.
///
/// The bytes are consumed; callers reopen or rewind before decoding.
pub fn detect_from_reader<R: Read>(reader: &mut R) -> io::Result<Codec> {
    let mut header = Vec::with_capacity(2);
    reader.take(2).read_to_end(&mut header)?;
    Ok(detect_codec(&header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_gzip() {
        assert_eq!(detect_codec(&[0x1F, 0x8B, 0x08, 0x00]), Codec::Gzip);
    }

    #[test]
    fn detect_zlib() {
        // default, best-speed and best-compression zlib headers
        assert_eq!(detect_codec(&[0x78, 0x9C]), Codec::Zlib);
        assert_eq!(detect_codec(&[0x78, 0x01]), Codec::Zlib);
        assert_eq!(detect_codec(&[0x78, 0xDA]), Codec::Zlib);
    }

    #[test]
    fn detect_raw_deflate_fallback() {
        assert_eq!(detect_codec(&[0x78, 0x9D]), Codec::Deflate);
        assert_eq!(detect_codec(&[0xED, 0xBD]), Codec::Deflate);
        assert_eq!(detect_codec(&[]), Codec::Deflate);
    }

    #[test]
    fn detect_reads_two_bytes() {
        let mut cursor = io::Cursor::new(vec![0x1F, 0x8B, 0x08]);
        assert_eq!(detect_from_reader(&mut cursor).unwrap(), Codec::Gzip);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn compressed_suffixes() {
        assert!(has_compressed_suffix(Path::new("pkg.tar.gz")));
        assert!(has_compressed_suffix(Path::new("dir/pkg.tgz")));
        assert!(has_compressed_suffix(Path::new("blob.gz")));
        assert!(!has_compressed_suffix(Path::new("pkg.tar")));
        assert!(!has_compressed_suffix(Path::new("pkg.gz.tar")));
        assert!(!has_compressed_suffix(Path::new("gz")));
    }
}
