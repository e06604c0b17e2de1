//! Positional file access for module data files.
//!
//! Module reads are random access over a handful of small files. [`ReadAt`]
//! narrows that to the two operations the store needs, with a file-backed
//! implementation sharing one descriptor behind a mutex and an in-memory
//! implementation for tests.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quire_common::{Result, error::Error};

/// A conceptual file supporting reads at arbitrary positions.
///
/// `read_at` is exact: it fails rather than short-reading when the
/// requested range extends past the end.
pub trait ReadAt: Send + Sync {
    /// Current size of the underlying object in bytes.
    fn size(&self) -> Result<u64>;

    /// Reads exactly `len` bytes starting at `offset`.
    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>>;

    /// Reads the entire object.
    fn read_all(&self) -> Result<Vec<u8>> {
        let size = self.size()?;
        let len = usize::try_from(size)
            .map_err(|_| Error::invalid_arg("size", "object too large to load"))?;
        self.read_at(0, len)
    }
}

/// [`ReadAt`] over an open file. One descriptor, positioned reads
/// serialized by a mutex.
#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileReader {
    pub fn open(path: impl AsRef<Path>) -> Result<FileReader> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Ok(FileReader {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, e: std::io::Error) -> Error {
        Error::io(self.path.display().to_string(), e)
    }
}

impl ReadAt for FileReader {
    fn size(&self) -> Result<u64> {
        let file = self.file.lock().unwrap();
        let meta = file.metadata().map_err(|e| self.io_err(e))?;
        Ok(meta.len())
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let mut file = self.file.lock().unwrap();
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| self.io_err(e))?;
        file.read_exact(&mut buf).map_err(|e| self.io_err(e))?;
        Ok(buf)
    }
}

/// [`ReadAt`] over a byte buffer.
pub struct MemoryReader(Vec<u8>);

impl From<Vec<u8>> for MemoryReader {
    fn from(bytes: Vec<u8>) -> MemoryReader {
        MemoryReader(bytes)
    }
}

impl ReadAt for MemoryReader {
    fn size(&self) -> Result<u64> {
        Ok(self.0.len() as u64)
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let start = usize::try_from(offset)
            .map_err(|_| Error::invalid_arg("offset", "offset beyond addressable range"))?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.0.len())
            .ok_or_else(|| {
                Error::io(
                    "memory reader",
                    std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
                )
            })?;
        Ok(self.0[start..end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn memory_reader_reads_exact_ranges() {
        let reader = MemoryReader::from(b"versified".to_vec());
        assert_eq!(reader.size().unwrap(), 9);
        assert_eq!(reader.read_at(0, 5).unwrap(), b"versi");
        assert_eq!(reader.read_at(5, 4).unwrap(), b"fied");
        assert_eq!(reader.read_all().unwrap(), b"versified");
        assert!(reader.read_at(5, 5).is_err());
        assert!(reader.read_at(9, 1).is_err());
        assert_eq!(reader.read_at(9, 0).unwrap(), b"");
    }

    #[test]
    fn file_reader_reads_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"0123456789")
            .unwrap();

        let reader = FileReader::open(&path).unwrap();
        assert_eq!(reader.size().unwrap(), 10);
        assert_eq!(reader.read_at(3, 4).unwrap(), b"3456");
        assert!(reader.read_at(8, 4).is_err());
    }

    #[test]
    fn opening_a_missing_file_fails_with_io_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileReader::open(dir.path().join("absent.bin")).unwrap_err();
        assert!(err.to_string().contains("absent.bin"));
    }
}
