//! On-disk layout of a module's data files.
//!
//! A module directory holds four files, named `text.{g}zv`, `text.{g}zs`,
//! `text.{g}zz` and `text.{g}zm` where `{g}` is the block-granularity
//! letter:
//!
//! - **verse map** (`zv`): one 10-byte entry per ordinal, `0 ..=
//!   max_ordinal`, locating the verse inside its uncompressed block:
//!   `u32 block`, `u32 start`, `u16 size`. A zero `size` means the module
//!   carries no text for that ordinal. Entry 0 is the introduction slot.
//! - **block index** (`zs`): one 12-byte entry per block: `u32 start`
//!   (offset in the data file), `u32 size` (compressed), `u32
//!   uncompressed_size`.
//! - **block data** (`zz`): the compressed blocks, concatenated.
//! - **manifest** (`zm`): fixed-size summary binding the other three
//!   files together: sizes and checksums, plus the codec and granularity
//!   they were written with.
//!
//! All integers are little endian.

use byteorder::{ByteOrder, LittleEndian};
use quire_codec::CodecKind;
use quire_common::{Result, error::Error, verify_data};

use crate::config::BlockGranularity;

pub const VERSE_MAP_ENTRY_SIZE: usize = 10;
pub const BLOCK_INDEX_ENTRY_SIZE: usize = 12;

pub const MANIFEST_MAGIC: [u8; 4] = *b"QVM1";
pub const MANIFEST_VERSION: u16 = 1;
/// Magic, version, granularity, codec, three file sizes, two index
/// checksums, trailing manifest checksum.
pub const MANIFEST_SIZE: usize = 4 + 2 + 1 + 1 + 3 * 8 + 2 * 4 + 4;

/// xxh3-64 folded to 32 bits.
pub fn checksum(buf: &[u8]) -> u32 {
    let h = xxhash_rust::xxh3::xxh3_64(buf);
    (h as u32) ^ ((h >> 32) as u32)
}

/// Names of the four data files for a granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileNames {
    pub verse_map: String,
    pub block_index: String,
    pub block_data: String,
    pub manifest: String,
}

pub fn data_file_names(granularity: BlockGranularity) -> DataFileNames {
    let g = granularity.letter();
    DataFileNames {
        verse_map: format!("text.{g}zv"),
        block_index: format!("text.{g}zs"),
        block_data: format!("text.{g}zz"),
        manifest: format!("text.{g}zm"),
    }
}

/// One verse map entry: where a verse's text sits in the uncompressed
/// block space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerseMapEntry {
    pub block: u32,
    pub start: u32,
    pub size: u16,
}

impl VerseMapEntry {
    /// True when the module has no text at this ordinal.
    pub fn is_absent(&self) -> bool {
        self.size == 0
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; VERSE_MAP_ENTRY_SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.block);
        LittleEndian::write_u32(&mut buf[4..8], self.start);
        LittleEndian::write_u16(&mut buf[8..10], self.size);
        out.extend_from_slice(&buf);
    }

    /// Decodes one entry; `buf` must hold exactly
    /// [`VERSE_MAP_ENTRY_SIZE`] bytes.
    pub fn read_from(buf: &[u8]) -> VerseMapEntry {
        debug_assert_eq!(buf.len(), VERSE_MAP_ENTRY_SIZE);
        VerseMapEntry {
            block: LittleEndian::read_u32(&buf[0..4]),
            start: LittleEndian::read_u32(&buf[4..8]),
            size: LittleEndian::read_u16(&buf[8..10]),
        }
    }
}

/// Decodes a whole verse map file.
pub fn decode_verse_map(bytes: &[u8]) -> Result<Vec<VerseMapEntry>> {
    verify_data!(verse_map, bytes.len() % VERSE_MAP_ENTRY_SIZE == 0);
    Ok(bytes
        .chunks_exact(VERSE_MAP_ENTRY_SIZE)
        .map(VerseMapEntry::read_from)
        .collect())
}

/// One block index entry: the compressed extent of a block in the data
/// file and its size once decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockIndexEntry {
    pub start: u32,
    pub size: u32,
    pub uncompressed_size: u32,
}

impl BlockIndexEntry {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; BLOCK_INDEX_ENTRY_SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.start);
        LittleEndian::write_u32(&mut buf[4..8], self.size);
        LittleEndian::write_u32(&mut buf[8..12], self.uncompressed_size);
        out.extend_from_slice(&buf);
    }

    /// Decodes one entry; `buf` must hold exactly
    /// [`BLOCK_INDEX_ENTRY_SIZE`] bytes.
    pub fn read_from(buf: &[u8]) -> BlockIndexEntry {
        debug_assert_eq!(buf.len(), BLOCK_INDEX_ENTRY_SIZE);
        BlockIndexEntry {
            start: LittleEndian::read_u32(&buf[0..4]),
            size: LittleEndian::read_u32(&buf[4..8]),
            uncompressed_size: LittleEndian::read_u32(&buf[8..12]),
        }
    }
}

/// Decodes a whole block index file.
pub fn decode_block_index(bytes: &[u8]) -> Result<Vec<BlockIndexEntry>> {
    verify_data!(block_index, bytes.len() % BLOCK_INDEX_ENTRY_SIZE == 0);
    Ok(bytes
        .chunks_exact(BLOCK_INDEX_ENTRY_SIZE)
        .map(BlockIndexEntry::read_from)
        .collect())
}

/// The module manifest, binding the three data files together.
///
/// A reader verifies the manifest's own trailing checksum at open, then
/// the sizes and checksums it records against the actual files. Size
/// drift after open is how a live module detects external modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    pub version: u16,
    pub granularity: BlockGranularity,
    pub codec: CodecKind,
    pub verse_map_size: u64,
    pub block_index_size: u64,
    pub block_data_size: u64,
    pub verse_map_checksum: u32,
    pub block_index_checksum: u32,
}

impl Manifest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MANIFEST_SIZE);
        out.extend_from_slice(&MANIFEST_MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(self.granularity.as_u8());
        out.push(self.codec.as_u8());
        out.extend_from_slice(&self.verse_map_size.to_le_bytes());
        out.extend_from_slice(&self.block_index_size.to_le_bytes());
        out.extend_from_slice(&self.block_data_size.to_le_bytes());
        out.extend_from_slice(&self.verse_map_checksum.to_le_bytes());
        out.extend_from_slice(&self.block_index_checksum.to_le_bytes());
        let trailer = checksum(&out);
        out.extend_from_slice(&trailer.to_le_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Manifest> {
        verify_data!(manifest, bytes.len() == MANIFEST_SIZE);
        let body = &bytes[..MANIFEST_SIZE - 4];
        let trailer = LittleEndian::read_u32(&bytes[MANIFEST_SIZE - 4..]);
        verify_data!(manifest, checksum(body) == trailer);
        verify_data!(manifest, body[0..4] == MANIFEST_MAGIC);
        let version = LittleEndian::read_u16(&body[4..6]);
        verify_data!(manifest, version == MANIFEST_VERSION);
        let granularity = BlockGranularity::from_u8(body[6])
            .ok_or_else(|| Error::corrupt_data("manifest", "unknown block granularity tag"))?;
        let codec = CodecKind::from_u8(body[7])
            .ok_or_else(|| Error::corrupt_data("manifest", "unknown codec tag"))?;
        Ok(Manifest {
            version,
            granularity,
            codec,
            verse_map_size: LittleEndian::read_u64(&body[8..16]),
            block_index_size: LittleEndian::read_u64(&body[16..24]),
            block_data_size: LittleEndian::read_u64(&body[24..32]),
            verse_map_checksum: LittleEndian::read_u32(&body[32..36]),
            block_index_checksum: LittleEndian::read_u32(&body[36..40]),
        })
    }
}
