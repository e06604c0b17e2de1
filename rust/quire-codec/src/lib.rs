//! Block codecs for module storage.
//!
//! A module stores its text as compressed blocks. Exactly two codecs exist,
//! selected by module configuration: the historical LZSS dictionary coder
//! and a zlib deflate stream. Both satisfy the same contract: for every
//! byte sequence `x`, including the empty one,
//! `uncompress(compress(x)) == x`.

mod deflate;
mod lzss;

pub use deflate::DeflateCodec;
pub use lzss::LzssCodec;

use quire_common::{Result, error::Error};

/// The closed set of block codecs understood by module storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// Sliding-window dictionary coder (4K window, 3..=18 byte matches).
    Lzss,
    /// zlib deflate stream, no custom framing.
    Deflate,
}

impl CodecKind {
    /// The value stored in a module config `CompressType` entry.
    pub fn as_config_value(&self) -> &'static str {
        match self {
            CodecKind::Lzss => "LZSS",
            CodecKind::Deflate => "ZIP",
        }
    }

    /// Single-byte tag used by the module manifest.
    pub fn as_u8(&self) -> u8 {
        match self {
            CodecKind::Lzss => 0,
            CodecKind::Deflate => 1,
        }
    }

    pub fn from_u8(tag: u8) -> Option<CodecKind> {
        match tag {
            0 => Some(CodecKind::Lzss),
            1 => Some(CodecKind::Deflate),
            _ => None,
        }
    }

    /// Instantiates the codec for this kind.
    pub fn create(&self) -> Box<dyn BlockCodec> {
        match self {
            CodecKind::Lzss => Box::new(LzssCodec),
            CodecKind::Deflate => Box::new(DeflateCodec),
        }
    }
}

impl std::str::FromStr for CodecKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<CodecKind> {
        if s.eq_ignore_ascii_case("lzss") {
            Ok(CodecKind::Lzss)
        } else if s.eq_ignore_ascii_case("zip") || s.eq_ignore_ascii_case("deflate") {
            Ok(CodecKind::Deflate)
        } else {
            Err(Error::invalid_arg("CompressType", s))
        }
    }
}

impl std::fmt::Display for CodecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_config_value())
    }
}

/// Contract shared by the two block codecs.
///
/// Implementations are stateless; a single instance may be shared across
/// threads.
pub trait BlockCodec: Send + Sync {
    /// Returns the kind of this codec.
    fn kind(&self) -> CodecKind;

    /// Compresses `data`, producing a self-contained compressed buffer.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Reverses [`compress`](Self::compress).
    ///
    /// Truncated or malformed input fails with a corrupt-data error rather
    /// than yielding garbage bytes.
    fn uncompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_config_values_round_trip() {
        for kind in [CodecKind::Lzss, CodecKind::Deflate] {
            assert_eq!(CodecKind::from_str(kind.as_config_value()).unwrap(), kind);
            assert_eq!(CodecKind::from_u8(kind.as_u8()), Some(kind));
        }
        assert_eq!(CodecKind::from_str("zip").unwrap(), CodecKind::Deflate);
        assert_eq!(CodecKind::from_str("Lzss").unwrap(), CodecKind::Lzss);
        assert!(CodecKind::from_str("bzip2").is_err());
        assert_eq!(CodecKind::from_u8(7), None);
    }

    #[test]
    fn codecs_are_interchangeable_behind_the_trait() {
        let sample = b"In the beginning God created the heaven and the earth.";
        for kind in [CodecKind::Lzss, CodecKind::Deflate] {
            let codec = kind.create();
            assert_eq!(codec.kind(), kind);
            let packed = codec.compress(sample).unwrap();
            assert_eq!(codec.uncompress(&packed).unwrap(), sample);
        }
    }
}
