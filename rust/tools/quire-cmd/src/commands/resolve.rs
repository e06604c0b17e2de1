//! Resolve command implementation

use std::sync::Arc;

use anyhow::Result;
use quire_passage::Passage;
use quire_versification::Catalog;

use crate::commands::open_module;

pub fn run(catalog: &Catalog, conf_path: String, reference: String) -> Result<()> {
    let module = open_module(&conf_path, catalog)?;
    let passage = Passage::parse(Arc::clone(module.versification()), &reference)?;

    let mut missing = 0usize;
    for verse in passage.verses() {
        match module.resolve(&verse) {
            Ok(text) => println!("{verse}\t{}", String::from_utf8_lossy(&text)),
            Err(err) if err.is_key_not_present() => missing += 1,
            Err(err) => return Err(err.into()),
        }
    }
    if missing > 0 {
        eprintln!("{missing} verse(s) of '{reference}' have no text in this module");
    }
    Ok(())
}
