//! Command implementations for quire-cmd

use anyhow::{Context, Result};
use quire_store::{Module, ModuleConfig};
use quire_versification::Catalog;

pub mod create;
pub mod inspect;
pub mod resolve;

/// Opens the module a `.conf` path describes.
pub fn open_module(conf_path: &str, catalog: &Catalog) -> Result<Module> {
    crate::utils::validate_file_exists(conf_path)?;
    let config = ModuleConfig::open(conf_path)
        .with_context(|| format!("Failed to parse module config: {conf_path}"))?;
    Module::open(config, catalog).with_context(|| format!("Failed to open module: {conf_path}"))
}
