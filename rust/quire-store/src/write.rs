//! Module writing: building a module directory verse by verse.
//!
//! A [`ModuleWriter`] accumulates everything in memory and materializes
//! the directory once, in [`ModuleWriter::finish`]. Verses must arrive in
//! ascending ordinal order; block boundaries follow the writer's
//! granularity, so a change of book (or chapter, or verse) seals the
//! current block and starts the next one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quire_codec::{BlockCodec, CodecKind};
use quire_common::{Result, error::Error, verify_arg, verify_data};
use quire_passage::Verse;
use quire_versification::Versification;

use crate::config::BlockGranularity;
use crate::layout::{self, BlockIndexEntry, Manifest, VerseMapEntry};

/// Identity of the block a verse belongs to under a given granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKey {
    Intro,
    Book(quire_versification::BookId),
    Chapter(quire_versification::BookId, u16),
    Verse(u32),
}

impl BlockKey {
    fn of(granularity: BlockGranularity, verse: &Verse) -> BlockKey {
        match granularity {
            BlockGranularity::Book => BlockKey::Book(verse.book()),
            BlockGranularity::Chapter => BlockKey::Chapter(verse.book(), verse.chapter()),
            BlockGranularity::Verse => BlockKey::Verse(verse.ordinal()),
        }
    }
}

/// Writes a module directory: the four data files plus a config the
/// reader side can open directly.
///
/// The verse map covers every ordinal of the versification; slots never
/// appended to (and slots appended with empty text) stay absent and read
/// back as [`Error::key_not_present`].
pub struct ModuleWriter {
    dir: PathBuf,
    name: String,
    v11n: Arc<Versification>,
    codec_kind: CodecKind,
    codec: Box<dyn BlockCodec>,
    granularity: BlockGranularity,
    entries: Vec<VerseMapEntry>,
    blocks: Vec<BlockIndexEntry>,
    data: Vec<u8>,
    current: Vec<u8>,
    current_key: Option<BlockKey>,
    last_ordinal: Option<u32>,
    stored: usize,
    extras: Vec<(String, String)>,
}

impl ModuleWriter {
    pub fn create(
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        v11n: Arc<Versification>,
        codec: CodecKind,
        granularity: BlockGranularity,
    ) -> Result<ModuleWriter> {
        let name = name.into();
        verify_arg!(name, !name.trim().is_empty());
        let entries = vec![VerseMapEntry::default(); v11n.max_ordinal() as usize + 1];
        Ok(ModuleWriter {
            dir: dir.into(),
            name,
            codec: codec.create(),
            codec_kind: codec,
            v11n,
            granularity,
            entries,
            blocks: Vec::new(),
            data: Vec::new(),
            current: Vec::new(),
            current_key: None,
            last_ordinal: None,
            stored: 0,
            extras: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn versification(&self) -> &Arc<Versification> {
        &self.v11n
    }

    /// Stores the module introduction in the ordinal 0 slot.
    ///
    /// Must precede the first [`append`](ModuleWriter::append); the
    /// introduction always forms a block of its own.
    pub fn set_introduction(&mut self, text: &[u8]) -> Result<()> {
        if self.last_ordinal.is_some() || !self.blocks.is_empty() || !self.current.is_empty() {
            return Err(Error::invalid_operation(
                "set_introduction after the first verse",
            ));
        }
        verify_arg!(text, text.len() <= u16::MAX as usize);
        self.store(0, BlockKey::Intro, text)
    }

    /// Appends the text of one verse.
    ///
    /// Verses must arrive in strictly ascending ordinal order and belong
    /// to the writer's versification. Empty text leaves the slot absent.
    pub fn append(&mut self, verse: &Verse, text: &[u8]) -> Result<()> {
        verify_arg!(verse, verse.versification().as_ref() == self.v11n.as_ref());
        verify_arg!(text, text.len() <= u16::MAX as usize);
        let ordinal = verse.ordinal();
        if let Some(last) = self.last_ordinal {
            verify_arg!(verse, ordinal > last);
        }
        self.store(ordinal, BlockKey::of(self.granularity, verse), text)?;
        self.last_ordinal = Some(ordinal);
        Ok(())
    }

    /// Adds an extra `key=value` line to the generated config.
    ///
    /// The structural keys (`DataPath`, `ModDrv`, `CompressType`,
    /// `BlockType`, `Versification`) are written automatically.
    pub fn add_config_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.push((key.into(), value.into()));
    }

    /// Seals the last block, writes the data files and the config, and
    /// returns the config path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.flush_block()?;

        let mut verse_map = Vec::with_capacity(self.entries.len() * layout::VERSE_MAP_ENTRY_SIZE);
        for entry in &self.entries {
            entry.write_to(&mut verse_map);
        }
        let mut block_index =
            Vec::with_capacity(self.blocks.len() * layout::BLOCK_INDEX_ENTRY_SIZE);
        for entry in &self.blocks {
            entry.write_to(&mut block_index);
        }
        let manifest = Manifest {
            version: layout::MANIFEST_VERSION,
            granularity: self.granularity,
            codec: self.codec_kind,
            verse_map_size: verse_map.len() as u64,
            block_index_size: block_index.len() as u64,
            block_data_size: self.data.len() as u64,
            verse_map_checksum: layout::checksum(&verse_map),
            block_index_checksum: layout::checksum(&block_index),
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::io(self.dir.display().to_string(), e))?;
        let names = layout::data_file_names(self.granularity);
        write_file(&self.dir.join(&names.verse_map), &verse_map)?;
        write_file(&self.dir.join(&names.block_index), &block_index)?;
        write_file(&self.dir.join(&names.block_data), &self.data)?;
        write_file(&self.dir.join(&names.manifest), &manifest.encode())?;

        let conf_path = self.dir.join(format!("{}.conf", self.name.to_lowercase()));
        write_file(&conf_path, self.conf_text().as_bytes())?;
        log::debug!(
            "module '{}': wrote {} verses in {} blocks to {}",
            self.name,
            self.stored,
            self.blocks.len(),
            self.dir.display()
        );
        Ok(conf_path)
    }

    fn store(&mut self, ordinal: u32, key: BlockKey, text: &[u8]) -> Result<()> {
        if self.current_key != Some(key) {
            self.flush_block()?;
            self.current_key = Some(key);
        }
        if text.is_empty() {
            return Ok(());
        }
        verify_arg!(text, self.current.len() + text.len() <= u32::MAX as usize);
        self.entries[ordinal as usize] = VerseMapEntry {
            block: self.blocks.len() as u32,
            start: self.current.len() as u32,
            size: text.len() as u16,
        };
        self.current.extend_from_slice(text);
        self.stored += 1;
        Ok(())
    }

    /// Compresses the pending block, if any, and adds it to the data file
    /// image.
    fn flush_block(&mut self) -> Result<()> {
        self.current_key = None;
        if self.current.is_empty() {
            return Ok(());
        }
        let compressed = self.codec.compress(&self.current)?;
        let start = self.data.len();
        verify_data!(block_data, start + compressed.len() <= u32::MAX as usize);
        self.blocks.push(BlockIndexEntry {
            start: start as u32,
            size: compressed.len() as u32,
            uncompressed_size: self.current.len() as u32,
        });
        self.data.extend_from_slice(&compressed);
        self.current.clear();
        Ok(())
    }

    fn conf_text(&self) -> String {
        let mut out = format!("[{}]\n", self.name);
        out.push_str("DataPath=./\n");
        out.push_str("ModDrv=zText\n");
        out.push_str(&format!(
            "CompressType={}\n",
            self.codec_kind.as_config_value()
        ));
        out.push_str(&format!(
            "BlockType={}\n",
            self.granularity.as_config_value()
        ));
        out.push_str(&format!("Versification={}\n", self.v11n.name()));
        for (key, value) in &self.extras {
            // Embedded newlines become continuation lines.
            out.push_str(&format!("{key}={}\n", value.replace('\n', "\\\n")));
        }
        out
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| Error::io(path.display().to_string(), e))
}
