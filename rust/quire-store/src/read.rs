//! Module reading: from a verse address to its raw text.
//!
//! Opening a module loads both index files fully into memory and verifies
//! them against the manifest; a module that survives [`Module::open`] is
//! `Ready`. Resolution is then two table lookups, a cached block
//! decompression, and a bounds-checked copy.
//!
//! A `Ready` module watches for external modification: whenever a block
//! has to be decompressed, the data file's current size is compared with
//! the size recorded at write time, and on drift the module flips to
//! `Invalid` and refuses further reads until re-opened.

use std::sync::{Arc, Mutex};

use quire_codec::BlockCodec;
use quire_common::{Result, error::Error, try_or_ret_some_err, verify_arg, verify_data};
use quire_passage::verse_range::VerseIter;
use quire_passage::{Passage, Verse, VerseRange};
use quire_versification::{Catalog, Versification};

use crate::cache::BlockCache;
use crate::config::ModuleConfig;
use crate::filter::{ContentNode, TextFilter};
use crate::io::{FileReader, ReadAt};
use crate::layout::{self, BlockIndexEntry, Manifest, VerseMapEntry};

/// Lifecycle of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Config parsed, indexes not yet resident.
    Unindexed,
    /// Verse map and block index resident, manifest not yet verified.
    IndexLoaded,
    /// Verified and serving reads.
    Ready,
    /// Indexes and data files no longer agree; re-open required.
    Invalid,
}

impl ModuleState {
    fn as_str(&self) -> &'static str {
        match self {
            ModuleState::Unindexed => "unindexed",
            ModuleState::IndexLoaded => "index-loaded",
            ModuleState::Ready => "ready",
            ModuleState::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved verse: the address and the raw stored bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVerse {
    pub verse: Verse,
    pub text: Vec<u8>,
}

/// An opened module, serving verse text from compressed blocks.
pub struct Module {
    config: ModuleConfig,
    v11n: Arc<Versification>,
    codec: Box<dyn BlockCodec>,
    manifest: Manifest,
    verse_map: Vec<VerseMapEntry>,
    block_index: Vec<BlockIndexEntry>,
    verse_map_file: FileReader,
    block_index_file: FileReader,
    data: FileReader,
    cache: BlockCache,
    state: Mutex<ModuleState>,
}

impl Module {
    /// Opens the module a config describes, resolving its versification
    /// through the given catalog.
    ///
    /// Only `Ready` modules are returned: the indexes load fully and every
    /// manifest check must pass.
    pub fn open(config: ModuleConfig, catalog: &Catalog) -> Result<Module> {
        let v11n = catalog.lookup(config.versification_name())?;
        let dir = config.data_dir();
        let names = layout::data_file_names(config.granularity());
        log::debug!(
            "module '{}': {} from {}",
            config.name(),
            ModuleState::Unindexed,
            dir.display()
        );

        let manifest_bytes = FileReader::open(dir.join(&names.manifest))?.read_all()?;
        let manifest = Manifest::decode(&manifest_bytes)?;
        verify_data!(manifest, manifest.granularity == config.granularity());
        verify_data!(manifest, manifest.codec == config.codec());

        let verse_map_file = FileReader::open(dir.join(&names.verse_map))?;
        let block_index_file = FileReader::open(dir.join(&names.block_index))?;
        let data = FileReader::open(dir.join(&names.block_data))?;

        let verse_map_bytes = verse_map_file.read_all()?;
        let block_index_bytes = block_index_file.read_all()?;
        let verse_map = layout::decode_verse_map(&verse_map_bytes)?;
        let block_index = layout::decode_block_index(&block_index_bytes)?;
        log::debug!(
            "module '{}': {}, {} verse entries, {} blocks",
            config.name(),
            ModuleState::IndexLoaded,
            verse_map.len(),
            block_index.len()
        );

        verify_data!(verse_map, verse_map_bytes.len() as u64 == manifest.verse_map_size);
        verify_data!(
            verse_map,
            layout::checksum(&verse_map_bytes) == manifest.verse_map_checksum
        );
        verify_data!(
            block_index,
            block_index_bytes.len() as u64 == manifest.block_index_size
        );
        verify_data!(
            block_index,
            layout::checksum(&block_index_bytes) == manifest.block_index_checksum
        );
        verify_data!(block_data, data.size()? == manifest.block_data_size);
        verify_data!(
            verse_map,
            verse_map.len() as u64 == u64::from(v11n.max_ordinal()) + 1
        );

        log::debug!("module '{}': {}", config.name(), ModuleState::Ready);
        Ok(Module {
            codec: manifest.codec.create(),
            config,
            v11n,
            manifest,
            verse_map,
            block_index,
            verse_map_file,
            block_index_file,
            data,
            cache: BlockCache::with_default_capacity(),
            state: Mutex::new(ModuleState::Ready),
        })
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn versification(&self) -> &Arc<Versification> {
        &self.v11n
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Number of compressed blocks in the module.
    pub fn block_count(&self) -> usize {
        self.block_index.len()
    }

    pub fn state(&self) -> ModuleState {
        *self.state.lock().unwrap()
    }

    /// The raw text stored for a verse.
    ///
    /// # Errors
    ///
    /// `Error::key_not_present` when the module has no text at this
    /// address (a legitimate gap, see
    /// [`Error::is_key_not_present`]); `Error::corrupt_data` when the
    /// indexes point outside their files; `Error::invalid_operation` once
    /// the module is `Invalid`.
    pub fn resolve(&self, verse: &Verse) -> Result<Vec<u8>> {
        verify_arg!(verse, verse.versification().as_ref() == self.v11n.as_ref());
        self.ensure_ready()?;
        let entry = self.entry(verse.ordinal())?;
        if entry.is_absent() {
            return Err(Error::key_not_present(verse.to_string()));
        }
        self.slice_block(entry)
    }

    /// Resolves every verse of a range lazily.
    ///
    /// Each item is the result for one verse; a failing verse (absent
    /// text, corrupt entry) yields its error in sequence without ending
    /// the iteration. Consecutive verses of one block share a single
    /// decompression through the cache.
    pub fn resolve_range(&self, range: &VerseRange) -> Result<RangeReader<'_>> {
        verify_arg!(range, range.versification().as_ref() == self.v11n.as_ref());
        self.ensure_ready()?;
        Ok(RangeReader {
            module: self,
            verses: range.verses(),
        })
    }

    /// True when the module stores text for the verse.
    pub fn contains(&self, verse: &Verse) -> bool {
        verse.versification().as_ref() == self.v11n.as_ref()
            && self.state() == ModuleState::Ready
            && self
                .verse_map
                .get(verse.ordinal() as usize)
                .is_some_and(|entry| !entry.is_absent())
    }

    /// The module introduction (ordinal 0 slot), if the writer stored one.
    pub fn introduction(&self) -> Result<Option<Vec<u8>>> {
        self.ensure_ready()?;
        let entry = self.entry(0)?;
        if entry.is_absent() {
            return Ok(None);
        }
        self.slice_block(entry).map(Some)
    }

    /// All verses with text, as a merged passage.
    pub fn present_verses(&self) -> Result<Passage> {
        self.ensure_ready()?;
        let mut ranges: Vec<VerseRange> = Vec::new();
        let mut run: Option<(u32, u32)> = None;
        for (ordinal, entry) in self.verse_map.iter().enumerate().skip(1) {
            let ordinal = ordinal as u32;
            if entry.is_absent() {
                continue;
            }
            run = match run {
                Some((start, end)) if end + 1 == ordinal => Some((start, ordinal)),
                Some((start, end)) => {
                    ranges.push(self.run_range(start, end)?);
                    Some((ordinal, ordinal))
                }
                None => Some((ordinal, ordinal)),
            };
        }
        if let Some((start, end)) = run {
            ranges.push(self.run_range(start, end)?);
        }
        Passage::from_ranges(Arc::clone(&self.v11n), ranges)
    }

    /// Resolves a verse and runs it through a text filter.
    pub fn resolve_filtered(
        &self,
        filter: &dyn TextFilter,
        verse: &Verse,
    ) -> Result<Vec<ContentNode>> {
        let raw = self.resolve(verse)?;
        filter.filter(self.name(), verse, &raw)
    }

    /// Re-checks the data files against the manifest, flipping `Ready` to
    /// `Invalid` on size drift. Returns the state after the check.
    pub fn revalidate(&self) -> Result<ModuleState> {
        if self.state() != ModuleState::Ready {
            return Ok(self.state());
        }
        let sizes = [
            (self.verse_map_file.size()?, self.manifest.verse_map_size),
            (self.block_index_file.size()?, self.manifest.block_index_size),
            (self.data.size()?, self.manifest.block_data_size),
        ];
        if sizes.iter().any(|(actual, recorded)| actual != recorded) {
            self.mark_invalid("file size drifted from the manifest");
        }
        Ok(self.state())
    }

    fn ensure_ready(&self) -> Result<()> {
        let state = self.state();
        if state == ModuleState::Ready {
            Ok(())
        } else {
            Err(Error::invalid_operation(format!(
                "module '{}' is {state}; re-open required",
                self.config.name()
            )))
        }
    }

    fn mark_invalid(&self, reason: &str) {
        let mut state = self.state.lock().unwrap();
        if *state == ModuleState::Ready {
            log::debug!(
                "module '{}': {} -> {} ({reason})",
                self.config.name(),
                ModuleState::Ready,
                ModuleState::Invalid
            );
            *state = ModuleState::Invalid;
        }
        drop(state);
        self.cache.clear();
    }

    fn entry(&self, ordinal: u32) -> Result<VerseMapEntry> {
        self.verse_map
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| {
                Error::corrupt_data("verse map", format!("no entry for ordinal {ordinal}"))
            })
    }

    /// Cuts a verse's bytes out of its (cached) decompressed block.
    fn slice_block(&self, entry: VerseMapEntry) -> Result<Vec<u8>> {
        let block = self.load_block(entry.block)?;
        let start = entry.start as usize;
        let end = start + entry.size as usize;
        verify_data!(verse_map, end <= block.len());
        Ok(block[start..end].to_vec())
    }

    fn load_block(&self, block: u32) -> Result<Arc<Vec<u8>>> {
        let index = self
            .block_index
            .get(block as usize)
            .copied()
            .ok_or_else(|| {
                Error::corrupt_data("block index", format!("no entry for block {block}"))
            })?;
        self.cache.get_or_load(block, || {
            let current = self.data.size()?;
            if current != self.manifest.block_data_size {
                self.mark_invalid("block data size drifted from the manifest");
                return Err(Error::invalid_operation(format!(
                    "module '{}' changed on disk; re-open required",
                    self.config.name()
                )));
            }
            let end = u64::from(index.start) + u64::from(index.size);
            verify_data!(block_index, end <= current);
            let compressed = self.data.read_at(index.start.into(), index.size as usize)?;
            let text = self.codec.uncompress(&compressed)?;
            verify_data!(block_index, text.len() == index.uncompressed_size as usize);
            Ok(text)
        })
    }

    fn run_range(&self, start: u32, end: u32) -> Result<VerseRange> {
        VerseRange::new(
            Verse::from_ordinal(Arc::clone(&self.v11n), start),
            Verse::from_ordinal(Arc::clone(&self.v11n), end),
        )
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.config.name())
            .field("v11n", &self.v11n.name())
            .field("codec", &self.manifest.codec)
            .field("granularity", &self.manifest.granularity)
            .field("blocks", &self.block_index.len())
            .field("state", &self.state())
            .finish()
    }
}

/// Lazy reader over the verses of one range. See
/// [`Module::resolve_range`].
pub struct RangeReader<'a> {
    module: &'a Module,
    verses: VerseIter,
}

impl Iterator for RangeReader<'_> {
    type Item = Result<RawVerse>;

    fn next(&mut self) -> Option<Self::Item> {
        let verse = self.verses.next()?;
        let text = try_or_ret_some_err!(self.module.resolve(&verse));
        Some(Ok(RawVerse { verse, text }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verses.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlockGranularity;
    use crate::write::ModuleWriter;
    use quire_codec::CodecKind;
    use quire_common::error::ErrorKind;
    use std::path::Path;

    fn kjv() -> Arc<Versification> {
        Catalog::new().lookup("KJV").unwrap()
    }

    fn verse(text: &str) -> Verse {
        Verse::parse(&kjv(), text).unwrap()
    }

    fn open(config: ModuleConfig) -> Result<Module> {
        Module::open(config, &Catalog::new())
    }

    fn write_demo_module(
        dir: &Path,
        codec: CodecKind,
        granularity: BlockGranularity,
    ) -> ModuleConfig {
        let mut writer =
            ModuleWriter::create(dir, "Demo", kjv(), codec, granularity).unwrap();
        writer.set_introduction(b"A tiny demo module.").unwrap();
        for (reference, text) in [
            ("Gen 1:1", "In the beginning."),
            ("Gen 1:2", "And the earth was without form."),
            ("Gen 1:3", "And there was light."),
            ("Gen 2:1", "Thus the heavens were finished."),
            ("Exod 1:1", "Now these are the names."),
        ] {
            writer.append(&verse(reference), text.as_bytes()).unwrap();
        }
        let conf = writer.finish().unwrap();
        ModuleConfig::open(conf).unwrap()
    }

    #[test]
    fn writer_reader_round_trip() {
        for codec in [CodecKind::Lzss, CodecKind::Deflate] {
            for granularity in [
                BlockGranularity::Book,
                BlockGranularity::Chapter,
                BlockGranularity::Verse,
            ] {
                let dir = tempfile::tempdir().unwrap();
                let config = write_demo_module(dir.path(), codec, granularity);
                let module = open(config).unwrap();
                assert_eq!(module.state(), ModuleState::Ready);
                assert_eq!(
                    module.resolve(&verse("Gen 1:3")).unwrap(),
                    b"And there was light.",
                    "{codec:?}/{granularity:?}"
                );
                assert_eq!(
                    module.resolve(&verse("Exod 1:1")).unwrap(),
                    b"Now these are the names."
                );
                assert_eq!(
                    module.introduction().unwrap().as_deref(),
                    Some(b"A tiny demo module.".as_slice())
                );
            }
        }
    }

    #[test]
    fn bulk_round_trip_with_generated_text() {
        let dir = tempfile::tempdir().unwrap();
        let v11n = kjv();
        let mut writer = ModuleWriter::create(
            dir.path(),
            "Bulk",
            Arc::clone(&v11n),
            CodecKind::Deflate,
            BlockGranularity::Chapter,
        )
        .unwrap();
        let genesis = v11n.find_book("Gen").unwrap();
        for chapter in 1..=3 {
            for v in VerseRange::whole_chapter(&v11n, genesis, chapter)
                .unwrap()
                .verses()
            {
                let text = quire_testkit::data_gen::verse_text(v.ordinal());
                writer.append(&v, text.as_bytes()).unwrap();
            }
        }
        let exodus = v11n.find_book("Exod").unwrap();
        for v in VerseRange::whole_chapter(&v11n, exodus, 1).unwrap().verses() {
            let text = quire_testkit::data_gen::verse_text(v.ordinal());
            writer.append(&v, text.as_bytes()).unwrap();
        }
        let conf = writer.finish().unwrap();
        let module = open(ModuleConfig::open(conf).unwrap()).unwrap();

        let present = module.present_verses().unwrap();
        assert_eq!(present.to_string(), "Gen 1-3, Exod 1");

        // Sequential read: every verse comes back as its regenerated text.
        let range = VerseRange::parse(&kjv(), "Gen 1-3").unwrap();
        for item in module.resolve_range(&range).unwrap() {
            let raw = item.unwrap();
            let expected = quire_testkit::data_gen::verse_text(raw.verse.ordinal());
            assert_eq!(raw.text, expected.into_bytes(), "{}", raw.verse);
        }

        // Random point reads across the whole ordinal space.
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..64 {
            let ordinal = rng.u32(1..=v11n.max_ordinal());
            let v = Verse::from_ordinal(Arc::clone(&v11n), ordinal);
            if present.contains(&v) {
                let expected = quire_testkit::data_gen::verse_text(ordinal);
                assert_eq!(module.resolve(&v).unwrap(), expected.into_bytes());
            } else {
                assert!(module.resolve(&v).unwrap_err().is_key_not_present());
            }
        }
    }

    #[test]
    fn block_grouping_follows_granularity() {
        // Intro block + Gen + Exod.
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        assert_eq!(open(config).unwrap().block_count(), 3);

        // Intro + Gen 1 + Gen 2 + Exod 1.
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Chapter);
        assert_eq!(open(config).unwrap().block_count(), 4);

        // Intro + five verses.
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Verse);
        assert_eq!(open(config).unwrap().block_count(), 6);
    }

    #[test]
    fn absent_verse_is_key_not_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        let module = open(config).unwrap();

        let err = module.resolve(&verse("Gen 1:4")).unwrap_err();
        assert!(err.is_key_not_present());
        assert!(!module.contains(&verse("Gen 1:4")));
        assert!(module.contains(&verse("Gen 1:3")));
        // The module stays usable after the miss.
        assert_eq!(module.state(), ModuleState::Ready);
        assert!(module.resolve(&verse("Gen 1:3")).is_ok());
    }

    #[test]
    fn resolve_range_yields_per_verse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Chapter);
        let module = open(config).unwrap();

        let range = VerseRange::parse(&kjv(), "Gen 1:2-5").unwrap();
        let outcomes: Vec<Result<RawVerse>> = module.resolve_range(&range).unwrap().collect();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(
            outcomes[0].as_ref().unwrap().text,
            b"And the earth was without form."
        );
        assert_eq!(outcomes[1].as_ref().unwrap().text, b"And there was light.");
        assert!(outcomes[2].as_ref().is_err_and(Error::is_key_not_present));
        assert!(outcomes[3].as_ref().is_err_and(Error::is_key_not_present));
    }

    #[test]
    fn present_verses_lists_stored_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        let module = open(config).unwrap();
        assert_eq!(
            module.present_verses().unwrap().to_string(),
            "Gen 1:1-3, Gen 2:1, Exod 1:1"
        );
    }

    #[test]
    fn truncated_data_file_invalidates_the_module() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Chapter);
        let module = open(config).unwrap();
        // Warm the cache with the first block only.
        assert!(module.resolve(&verse("Gen 1:1")).is_ok());

        let data_path = dir.path().join("text.czz");
        let original = std::fs::read(&data_path).unwrap();
        std::fs::write(&data_path, &original[..4]).unwrap();

        // The next uncached block sees the drift.
        let err = module.resolve(&verse("Exod 1:1")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));
        assert_eq!(module.state(), ModuleState::Invalid);

        // Everything afterwards refuses, cached or not.
        let err = module.resolve(&verse("Gen 1:1")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));
        assert_eq!(module.revalidate().unwrap(), ModuleState::Invalid);
    }

    #[test]
    fn revalidate_detects_drift_without_a_read() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        let module = open(config).unwrap();
        assert_eq!(module.revalidate().unwrap(), ModuleState::Ready);

        let map_path = dir.path().join("text.bzv");
        let original = std::fs::read(&map_path).unwrap();
        std::fs::write(&map_path, &original[..original.len() - 10]).unwrap();
        assert_eq!(module.revalidate().unwrap(), ModuleState::Invalid);
    }

    #[test]
    fn tampered_index_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);

        let map_path = dir.path().join("text.bzv");
        let mut bytes = std::fs::read(&map_path).unwrap();
        bytes[18] ^= 0x01;
        std::fs::write(&map_path, &bytes).unwrap();

        let err = open(config).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::CorruptData { .. }));
    }

    #[test]
    fn missing_data_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        std::fs::remove_file(dir.path().join("text.bzz")).unwrap();
        let err = open(config).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io { .. }));
    }

    #[test]
    fn hand_built_block_layout_resolves() {
        // A module whose single block holds "Hello world": the first
        // entry takes the first five bytes, the third the last five, and
        // the second overruns the block on purpose.
        let dir = tempfile::tempdir().unwrap();
        let v11n = kjv();
        let codec = CodecKind::Lzss.create();
        let block = b"Hello world";
        let compressed = codec.compress(block).unwrap();

        let mut verse_map = Vec::new();
        let mut entries = vec![VerseMapEntry::default(); v11n.max_ordinal() as usize + 1];
        entries[1] = VerseMapEntry {
            block: 0,
            start: 0,
            size: 5,
        };
        entries[2] = VerseMapEntry {
            block: 0,
            start: 6,
            size: 200,
        };
        entries[3] = VerseMapEntry {
            block: 0,
            start: 6,
            size: 5,
        };
        for entry in &entries {
            entry.write_to(&mut verse_map);
        }

        let mut block_index = Vec::new();
        BlockIndexEntry {
            start: 0,
            size: compressed.len() as u32,
            uncompressed_size: block.len() as u32,
        }
        .write_to(&mut block_index);

        let manifest = Manifest {
            version: layout::MANIFEST_VERSION,
            granularity: BlockGranularity::Book,
            codec: CodecKind::Lzss,
            verse_map_size: verse_map.len() as u64,
            block_index_size: block_index.len() as u64,
            block_data_size: compressed.len() as u64,
            verse_map_checksum: layout::checksum(&verse_map),
            block_index_checksum: layout::checksum(&block_index),
        };

        std::fs::write(dir.path().join("text.bzv"), &verse_map).unwrap();
        std::fs::write(dir.path().join("text.bzs"), &block_index).unwrap();
        std::fs::write(dir.path().join("text.bzz"), &compressed).unwrap();
        std::fs::write(dir.path().join("text.bzm"), manifest.encode()).unwrap();
        std::fs::write(
            dir.path().join("hello.conf"),
            "[Hello]\nDataPath=./\nModDrv=zText\n",
        )
        .unwrap();

        let config = ModuleConfig::open(dir.path().join("hello.conf")).unwrap();
        let module = open(config).unwrap();

        assert_eq!(module.resolve(&verse("Gen 1:1")).unwrap(), b"Hello");
        assert_eq!(module.resolve(&verse("Gen 1:3")).unwrap(), b"world");
        let err = module.resolve(&verse("Gen 1:2")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::CorruptData { .. }));
        let err = module.resolve(&verse("Gen 1:4")).unwrap_err();
        assert!(err.is_key_not_present());
    }

    #[test]
    fn cross_system_verse_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_module(dir.path(), CodecKind::Lzss, BlockGranularity::Book);
        let module = open(config).unwrap();
        let lxx = Catalog::new().lookup("LXX").unwrap();
        let foreign = Verse::parse(&lxx, "Gen 1:1").unwrap();
        assert!(module.resolve(&foreign).is_err());
        assert!(!module.contains(&foreign));
    }
}
