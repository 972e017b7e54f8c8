use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

/// How the caller wants the source archive treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    /// Compressed iff the file name ends in `.gz` or `.tgz`; the framing is
    /// then sniffed from the leading bytes.
    #[default]
    Auto,
    /// The source is a raw container.
    None,
    Gzip,
    Zlib,
    Deflate,
}

/// DEFLATE framing of a compressed source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zlib,
    Deflate,
}

impl Codec {
    /// Wrap `reader` in the matching decoder.
    pub fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::Gzip => Decoder::Gzip(Box::new(GzDecoder::new(reader))),
            Self::Zlib => Decoder::Zlib(Box::new(ZlibDecoder::new(reader))),
            Self::Deflate => Decoder::Deflate(Box::new(DeflateDecoder::new(reader))),
        }
    }
}

impl Compression {
    /// The explicit codec for this setting, if it names one.
    pub fn codec(self) -> Option<Codec> {
        match self {
            Self::Auto | Self::None => None,
            Self::Gzip => Some(Codec::Gzip),
            Self::Zlib => Some(Codec::Zlib),
            Self::Deflate => Some(Codec::Deflate),
        }
    }
}

/// Decoder wrapper over the supported DEFLATE framings.
#[derive(Debug)]
pub enum Decoder<R> {
    Gzip(Box<GzDecoder<R>>),
    Zlib(Box<ZlibDecoder<R>>),
    Deflate(Box<DeflateDecoder<R>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Gzip(d) => d.read(buf),
            Self::Zlib(d) => d.read(buf),
            Self::Deflate(d) => d.read(buf),
        }
    }
}
