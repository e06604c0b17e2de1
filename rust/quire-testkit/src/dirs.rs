//! Scratch directory management for module-building tests.

use std::path::{Path, PathBuf};

/// Creates a scratch library directory; module directories go inside.
/// Dropped with its contents when the returned guard drops.
pub fn temp_library() -> anyhow::Result<tempfile::TempDir> {
    Ok(tempfile::tempdir()?)
}

/// Creates (if needed) and returns the directory for one module inside a
/// library.
pub fn module_dir(library: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let dir = library.join(name.to_lowercase());
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    #[test]
    fn library_and_module_dirs() {
        let library = super::temp_library().unwrap();
        let dir = super::module_dir(library.path(), "Demo").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("demo"));
        let again = super::module_dir(library.path(), "Demo").unwrap();
        assert_eq!(dir, again);
    }
}
