use std::io::Write;

use anyhow::{Context, Result};
use ek_core::table::Tables;
use ek_core::traits::TableEmitter;
use serde::Serialize;

/// Sparse form: only the mapped slots, as `[index, value]` pairs in index order.
#[derive(Serialize)]
struct SparseTables {
    decode: Vec<(u16, u16)>,
    encode: Vec<(u16, u16)>,
}

/// JSON dump of the mapped slots, for inspection and diffing.
///
/// # Example
/// ```
/// use ek_core::builder::build;
/// use ek_core::reader::MappingEntry;
/// use ek_core::traits::TableEmitter;
/// use ek_export::json::JsonEmitter;
///
/// let tables = build([MappingEntry { position: 0, codepoint: 0x41 }]).unwrap();
/// let mut out = Vec::new();
/// JsonEmitter.emit(&tables, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "{\"decode\":[[0,65]],\"encode\":[[65,33089]]}\n");
/// ```
pub struct JsonEmitter;

impl TableEmitter for JsonEmitter {
    fn emit(&self, tables: &Tables, out: &mut dyn Write) -> Result<()> {
        let sparse = SparseTables {
            decode: tables.decode().iter_mapped().collect(),
            encode: tables.encode().iter_mapped().collect(),
        };
        serde_json::to_writer(&mut *out, &sparse).context("Sérialisation JSON impossible")?;
        writeln!(out)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ek_core::builder::build;
    use ek_core::layout::decompose;
    use ek_core::reader::MappingEntry;

    #[test]
    fn keeps_canonical_pair() {
        let tables = build([
            MappingEntry {
                position: 5,
                codepoint: 0x41,
            },
            MappingEntry {
                position: 9,
                codepoint: 0x41,
            },
        ])
        .unwrap();
        let mut out = Vec::new();
        JsonEmitter.emit(&tables, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["decode"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["encode"][0],
            serde_json::json!([0x41, decompose(5).packed()])
        );
    }
}
