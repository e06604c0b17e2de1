//! Deflate block codec: a zlib stream with no framing of its own.

use std::io::{Read, Write};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use quire_common::{Result, error::Error};

use crate::{BlockCodec, CodecKind};

pub struct DeflateCodec;

impl BlockCodec for DeflateCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Deflate
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .and_then(|_| encoder.finish())
            .map_err(|e| Error::io("deflate compress", e))
    }

    fn uncompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut out = Vec::with_capacity(data.len() * 2);
        decoder
            .read_to_end(&mut out)
            .map_err(|e| Error::corrupt_data("deflate block", e.to_string()))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_including_empty() {
        let codec = DeflateCodec;
        for data in [
            &b""[..],
            &b"a"[..],
            &b"In the beginning God created the heaven and the earth."[..],
        ] {
            let packed = codec.compress(data).unwrap();
            assert_eq!(codec.uncompress(&packed).unwrap(), data);
        }
    }

    #[test]
    fn random_bytes_round_trip() {
        let mut rng = fastrand::Rng::with_seed(7);
        let data: Vec<u8> = (0..10_000).map(|_| rng.u8(..)).collect();
        let codec = DeflateCodec;
        let packed = codec.compress(&data).unwrap();
        assert_eq!(codec.uncompress(&packed).unwrap(), data);
    }

    #[test]
    fn garbage_input_is_corrupt() {
        let err = DeflateCodec.uncompress(b"not a zlib stream").unwrap_err();
        assert!(matches!(
            err.kind(),
            quire_common::error::ErrorKind::CorruptData { .. }
        ));
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let codec = DeflateCodec;
        let packed = codec
            .compress(b"and God said, Let there be light: and there was light")
            .unwrap();
        let err = codec.uncompress(&packed[..packed.len() / 2]).unwrap_err();
        assert!(matches!(
            err.kind(),
            quire_common::error::ErrorKind::CorruptData { .. }
        ));
    }
}
