//! Compressed module storage.
//!
//! A module is a directory holding one versified text: a `.conf` file
//! describing it and four data files carrying the text as compressed
//! blocks. Verses are located through two fixed-width indexes, the verse
//! map (ordinal to block/offset/length) and the block index (block to
//! compressed extent), both loaded fully into memory when the module is
//! opened. A bounded cache keeps recently decompressed blocks so that
//! consecutive verses of one block cost a single decompression.
//!
//! Reading goes through [`Module`]; building a module goes through
//! [`ModuleWriter`]. The two round-trip exactly.

pub mod cache;
pub mod config;
pub mod filter;
pub mod io;
pub mod layout;
pub mod read;
pub mod search;
pub mod write;

pub use config::{BlockGranularity, ModuleConfig};
pub use filter::{ContentNode, PassthroughFilter, TextFilter};
pub use read::{Module, ModuleState, RawVerse};
pub use search::SearchIndex;
pub use write::ModuleWriter;
