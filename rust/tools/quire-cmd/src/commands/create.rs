//! Create command implementation

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use quire_codec::CodecKind;
use quire_passage::Verse;
use quire_store::{BlockGranularity, ModuleWriter};
use quire_versification::Catalog;

#[allow(clippy::too_many_arguments)]
pub fn run(
    catalog: &Catalog,
    name: String,
    versification: String,
    compress: String,
    block: String,
    description: Option<String>,
    file: String,
    dir: String,
) -> Result<()> {
    crate::utils::validate_file_exists(&file)?;
    let v11n = catalog
        .lookup(&versification)
        .with_context(|| format!("Unknown versification: {versification}"))?;
    let codec: CodecKind = compress
        .parse()
        .with_context(|| format!("Unknown codec: {compress}"))?;
    let granularity: BlockGranularity = block
        .parse()
        .with_context(|| format!("Unknown block granularity: {block}"))?;

    let mut writer = ModuleWriter::create(&dir, &name, Arc::clone(&v11n), codec, granularity)?;
    if let Some(description) = description {
        writer.add_config_entry("Description", description);
    }

    let source = fs::read_to_string(&file).with_context(|| format!("Failed to read {file}"))?;
    let mut count = 0usize;
    for (index, line) in source.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (reference, text) = split_line(line)
            .with_context(|| format!("{file}:{}: expected 'reference<TAB>text'", index + 1))?;
        let verse = Verse::parse(&v11n, reference)
            .with_context(|| format!("{file}:{}: bad verse reference '{reference}'", index + 1))?;
        writer
            .append(&verse, text.as_bytes())
            .with_context(|| format!("{file}:{}: cannot store verse", index + 1))?;
        count += 1;
    }

    let conf_path = writer.finish()?;
    println!(
        "Created module '{name}': {count} verses, config at {}",
        conf_path.display()
    );
    Ok(())
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    line.split_once('\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_store::{Module, ModuleConfig};
    use std::io::Write;

    #[test]
    fn source_lines_split_on_the_first_tab() {
        assert_eq!(
            split_line("Gen 1:1\tIn the beginning"),
            Some(("Gen 1:1", "In the beginning"))
        );
        assert_eq!(
            split_line("Gen 1:1\ttext with\ttab"),
            Some(("Gen 1:1", "text with\ttab"))
        );
        assert_eq!(split_line("no tab here"), None);
    }

    #[test]
    fn create_builds_an_openable_module() {
        let library = quire_testkit::dirs::temp_library().unwrap();
        let module_dir = quire_testkit::dirs::module_dir(library.path(), "Gen").unwrap();

        let mut source = tempfile::NamedTempFile::new().unwrap();
        writeln!(source, "# demo source").unwrap();
        for (reference, ordinal) in [("Gen 1:1", 1), ("Gen 1:2", 2), ("Gen 1:3", 3)] {
            writeln!(
                source,
                "{reference}\t{}",
                quire_testkit::data_gen::verse_text(ordinal)
            )
            .unwrap();
        }
        source.flush().unwrap();

        let catalog = Catalog::new();
        run(
            &catalog,
            "Gen".to_string(),
            "KJV".to_string(),
            "zip".to_string(),
            "chapter".to_string(),
            Some("Generated demo".to_string()),
            source.path().display().to_string(),
            module_dir.display().to_string(),
        )
        .unwrap();

        let conf_path = module_dir.join("gen.conf");
        let module = Module::open(ModuleConfig::open(&conf_path).unwrap(), &catalog).unwrap();
        let v11n = module.versification().clone();
        let verse = Verse::parse(&v11n, "Gen 1:2").unwrap();
        assert_eq!(
            module.resolve(&verse).unwrap(),
            quire_testkit::data_gen::verse_text(2).into_bytes()
        );
        assert_eq!(module.config().description(), Some("Generated demo"));
    }
}
