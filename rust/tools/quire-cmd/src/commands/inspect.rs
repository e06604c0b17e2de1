//! Inspect command implementation

use anyhow::Result;
use quire_versification::Catalog;
use serde::Serialize;

use crate::commands::open_module;
use crate::utils::format_size;

#[derive(Serialize)]
struct InspectSummary {
    name: String,
    versification: String,
    codec: String,
    granularity: String,
    state: String,
    verse_slots: u64,
    present_verses: u32,
    block_count: usize,
    sizes: SizeInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    config: Vec<ConfigEntryInfo>,
}

#[derive(Serialize)]
struct SizeInfo {
    verse_map: String,
    block_index: String,
    block_data: String,
}

#[derive(Serialize)]
struct ConfigEntryInfo {
    key: String,
    value: String,
}

pub fn run(catalog: &Catalog, verbose: u8, conf_path: String) -> Result<()> {
    let module = open_module(&conf_path, catalog)?;
    let present = module.present_verses()?;
    let manifest = module.manifest();

    let mut config_entries = Vec::new();
    if verbose > 0 {
        let mut keys: Vec<&str> = module.config().keys().collect();
        keys.sort_unstable();
        for key in keys {
            for value in module.config().values(key) {
                config_entries.push(ConfigEntryInfo {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }
    }

    let summary = InspectSummary {
        name: module.name().to_string(),
        versification: module.versification().name().to_string(),
        codec: module.config().codec().as_config_value().to_string(),
        granularity: module.config().granularity().as_config_value().to_string(),
        state: module.state().to_string(),
        verse_slots: u64::from(module.versification().max_ordinal()) + 1,
        present_verses: present.count_verses(),
        block_count: module.block_count(),
        sizes: SizeInfo {
            verse_map: format_size(manifest.verse_map_size),
            block_index: format_size(manifest.block_index_size),
            block_data: format_size(manifest.block_data_size),
        },
        coverage: (verbose > 0).then(|| present.overview()),
        config: config_entries,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
