//! Module configuration (`.conf`) parsing.
//!
//! The format is line oriented: a `[Name]` header, then `key = value`
//! entries. Keys are case-insensitive; repeated keys accumulate values in
//! order; a trailing `\` continues the value onto the next line (joined
//! with a newline); `#` starts a comment. Unknown keys are kept and
//! reported at warn level, so a config written by a newer tool still
//! opens.

use std::path::{Path, PathBuf};

use ahash::HashMap;
use quire_codec::CodecKind;
use quire_common::{Result, error::Error};

/// How verses are grouped into compressed blocks.
///
/// Coarser blocks compress better and cost more memory per decompressed
/// block; finer blocks read less but compress poorly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockGranularity {
    #[default]
    Book,
    Chapter,
    Verse,
}

impl BlockGranularity {
    /// The letter embedded in the data file names (`text.bzz` etc).
    pub fn letter(&self) -> char {
        match self {
            BlockGranularity::Book => 'b',
            BlockGranularity::Chapter => 'c',
            BlockGranularity::Verse => 'v',
        }
    }

    /// The value stored in a `BlockType` config entry.
    pub fn as_config_value(&self) -> &'static str {
        match self {
            BlockGranularity::Book => "BOOK",
            BlockGranularity::Chapter => "CHAPTER",
            BlockGranularity::Verse => "VERSE",
        }
    }

    /// Single-byte tag used by the module manifest.
    pub fn as_u8(&self) -> u8 {
        match self {
            BlockGranularity::Book => 0,
            BlockGranularity::Chapter => 1,
            BlockGranularity::Verse => 2,
        }
    }

    pub fn from_u8(tag: u8) -> Option<BlockGranularity> {
        match tag {
            0 => Some(BlockGranularity::Book),
            1 => Some(BlockGranularity::Chapter),
            2 => Some(BlockGranularity::Verse),
            _ => None,
        }
    }
}

impl std::str::FromStr for BlockGranularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<BlockGranularity> {
        if s.eq_ignore_ascii_case("book") {
            Ok(BlockGranularity::Book)
        } else if s.eq_ignore_ascii_case("chapter") {
            Ok(BlockGranularity::Chapter)
        } else if s.eq_ignore_ascii_case("verse") {
            Ok(BlockGranularity::Verse)
        } else {
            Err(Error::invalid_arg("BlockType", s))
        }
    }
}

impl std::fmt::Display for BlockGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_config_value())
    }
}

/// Parsed module configuration.
///
/// Beyond the entries that drive storage (`DataPath`, `ModDrv`,
/// `CompressType`, `BlockType`, `Versification`), every entry of the file
/// is retained and reachable through [`value`](ModuleConfig::value) /
/// [`values`](ModuleConfig::values).
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    name: String,
    conf_dir: Option<PathBuf>,
    entries: HashMap<String, Vec<String>>,
    data_path: String,
    codec: CodecKind,
    granularity: BlockGranularity,
    versification: String,
}

/// Entries this crate interprets; everything else is free-form.
const KNOWN_KEYS: &[&str] = &[
    "datapath",
    "moddrv",
    "compresstype",
    "blocktype",
    "versification",
    "description",
    "lang",
    "direction",
];

impl ModuleConfig {
    /// Reads and parses a `.conf` file. Relative `DataPath` values resolve
    /// against the file's directory.
    pub fn open(path: impl AsRef<Path>) -> Result<ModuleConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let mut config = ModuleConfig::parse(&text)?;
        config.conf_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses config text.
    pub fn parse(text: &str) -> Result<ModuleConfig> {
        let mut name: Option<String> = None;
        let mut entries: HashMap<String, Vec<String>> = HashMap::default();
        let mut key_lines: HashMap<String, usize> = HashMap::default();

        let mut lines = text.lines().enumerate().peekable();
        while let Some((index, raw)) = lines.next() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let header = header
                    .strip_suffix(']')
                    .ok_or_else(|| Error::malformed_config(line_no, "unterminated section header"))?
                    .trim();
                if header.is_empty() {
                    return Err(Error::malformed_config(line_no, "empty section header"));
                }
                if name.is_some() {
                    return Err(Error::malformed_config(line_no, "more than one section header"));
                }
                name = Some(header.to_string());
                continue;
            }

            if name.is_none() {
                return Err(Error::malformed_config(
                    line_no,
                    "entry before the section header",
                ));
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::malformed_config(line_no, format!("not a key=value line: '{line}'")));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::malformed_config(line_no, "empty key"));
            }

            let mut value = value.trim().to_string();
            while let Some(stem) = value.strip_suffix('\\') {
                // Continuation; blank and comment lines inside it are
                // skipped like anywhere else.
                let mut continued = "";
                while let Some((_, next)) = lines.peek() {
                    let next = next.trim();
                    if next.is_empty() || next.starts_with('#') {
                        lines.next();
                        continue;
                    }
                    continued = next;
                    lines.next();
                    break;
                }
                if continued.is_empty() {
                    value = stem.trim_end().to_string();
                    break;
                }
                value = format!("{}\n{}", stem.trim_end(), continued);
            }

            if value.is_empty() {
                log::warn!("ignoring empty config entry '{key}' at line {line_no}");
                continue;
            }

            let folded = key.to_ascii_lowercase();
            if !KNOWN_KEYS.contains(&folded.as_str()) {
                log::warn!("unknown config entry '{key}' at line {line_no}");
            }
            key_lines.entry(folded.clone()).or_insert(line_no);
            entries.entry(folded).or_default().push(value);
        }

        let name = name.ok_or_else(|| Error::malformed_config(0, "no section header"))?;

        let first = |key: &str| entries.get(key).and_then(|v| v.first()).map(String::as_str);
        let line_of = |key: &str| key_lines.get(key).copied().unwrap_or(0);

        let data_path = first("datapath")
            .ok_or_else(|| Error::missing_config("DataPath"))?
            .to_string();
        let driver = first("moddrv").ok_or_else(|| Error::missing_config("ModDrv"))?;
        if !driver.eq_ignore_ascii_case("zText") {
            return Err(Error::malformed_config(
                line_of("moddrv"),
                format!("unsupported ModDrv '{driver}', only zText modules are readable"),
            ));
        }
        let codec = match first("compresstype") {
            Some(text) => text
                .parse::<CodecKind>()
                .map_err(|_| {
                    Error::malformed_config(
                        line_of("compresstype"),
                        format!("unsupported CompressType '{text}'"),
                    )
                })?,
            None => CodecKind::Lzss,
        };
        let granularity = match first("blocktype") {
            Some(text) => text
                .parse::<BlockGranularity>()
                .map_err(|_| {
                    Error::malformed_config(
                        line_of("blocktype"),
                        format!("unsupported BlockType '{text}'"),
                    )
                })?,
            None => BlockGranularity::Book,
        };
        let versification = first("versification")
            .unwrap_or(quire_versification::catalog::DEFAULT)
            .to_string();

        Ok(ModuleConfig {
            name,
            conf_dir: None,
            entries,
            data_path,
            codec,
            granularity,
            versification,
        })
    }

    /// The module's name, from the section header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value of an entry, if present. Keys are case-insensitive.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// All values of a (possibly repeated) entry, in file order.
    pub fn values(&self, key: &str) -> &[String] {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Keys present in the config, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.value("Description")
    }

    pub fn language(&self) -> Option<&str> {
        self.value("Lang")
    }

    pub fn direction(&self) -> Option<&str> {
        self.value("Direction")
    }

    /// The directory holding the module's data files.
    pub fn data_dir(&self) -> PathBuf {
        let data_path = Path::new(&self.data_path);
        match (&self.conf_dir, data_path.is_absolute()) {
            (Some(dir), false) => dir.join(data_path),
            _ => data_path.to_path_buf(),
        }
    }

    pub fn codec(&self) -> CodecKind {
        self.codec
    }

    pub fn granularity(&self) -> BlockGranularity {
        self.granularity
    }

    /// Name of the versification the module's ordinals refer to.
    pub fn versification_name(&self) -> &str {
        &self.versification
    }
}
