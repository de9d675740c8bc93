/// Emitters persisting the built EUC-KR tables (Rust source, bincode, JSON).

pub mod binary;
pub mod json;
pub mod rust_source;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ek_core::config::{GenConfig, OutputFormat};
use ek_core::table::Tables;
use ek_core::traits::TableEmitter;

/// Emitter matching the configured output format.
///
/// `source` is the origin of the mapping, quoted in generated headers.
///
/// # Example
/// ```
/// use ek_core::config::{GenConfig, OutputFormat};
/// use ek_export::emitter_for;
/// let config = GenConfig { format: OutputFormat::Json, ..GenConfig::default() };
/// assert_eq!(emitter_for(&config, "index-euc-kr.txt").name(), "json");
/// ```
#[must_use]
pub fn emitter_for(config: &GenConfig, source: &str) -> Box<dyn TableEmitter> {
    match config.format {
        OutputFormat::Rust => Box::new(rust_source::RustEmitter::new(
            &config.decode_name,
            &config.encode_name,
            source,
        )),
        OutputFormat::Bincode => Box::new(binary::BincodeEmitter),
        OutputFormat::Json => Box::new(json::JsonEmitter),
    }
}

/// Write `tables` to `path` (parent directories created) or to stdout.
///
/// # Errors
/// Returns an error if the file cannot be created or the emitter fails.
pub fn write_tables(tables: &Tables, emitter: &dyn TableEmitter, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Impossible de créer {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Impossible de créer {}", path.display()))?;
        let mut out = BufWriter::new(file);
        emitter.emit(tables, &mut out)?;
        out.flush()
            .with_context(|| format!("Écriture incomplète de {}", path.display()))?;
        log::info!("Tables écrites ({}) dans {}", emitter.name(), path.display());
    } else {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        emitter.emit(tables, &mut out)?;
        out.flush().context("Écriture sur stdout impossible")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ek_core::builder::build;
    use ek_core::reader::MappingEntry;

    #[test]
    fn writes_into_nested_directory() {
        let tables = build([MappingEntry {
            position: 0,
            codepoint: 0xac02,
        }])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen").join("tables.json");
        let config = GenConfig {
            format: OutputFormat::Json,
            ..GenConfig::default()
        };
        let emitter = emitter_for(&config, "test");
        write_tables(&tables, emitter.as_ref(), Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[0,44034]"));
    }

    #[test]
    fn emitter_names() {
        let mut config = GenConfig::default();
        assert_eq!(emitter_for(&config, "x").name(), "rust");
        config.format = OutputFormat::Bincode;
        assert_eq!(emitter_for(&config, "x").name(), "bincode");
    }
}
